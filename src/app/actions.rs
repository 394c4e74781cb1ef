use turbine_core::{Rejection, Ticket};

use crate::state::{Focus, State};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InputChar(char),
    InsertText(String),
    InputBackspace,
    ClearField,
    FocusNext,
    FocusPrev,
    /// Done editing this field: hand focus to the submit button
    DismissField,
    Submit,
    ToggleTheme,
    None,
}

pub enum ActionResult {
    Nothing,
    /// The gate authorized a request; the caller must start exactly one worker
    StartRequest(Ticket),
}

pub fn apply_action(state: &mut State, action: Action) -> ActionResult {
    match action {
        Action::InputChar(c) => {
            edit_focused(state, |text| text.push(c));
            ActionResult::Nothing
        }
        Action::InsertText(pasted) => {
            edit_focused(state, |text| text.push_str(&pasted));
            ActionResult::Nothing
        }
        Action::InputBackspace => {
            edit_focused(state, |text| {
                text.pop();
            });
            ActionResult::Nothing
        }
        Action::ClearField => {
            edit_focused(state, String::clear);
            ActionResult::Nothing
        }
        Action::FocusNext => {
            state.focus = state.focus.next();
            state.dirty = true;
            ActionResult::Nothing
        }
        Action::FocusPrev => {
            state.focus = state.focus.prev();
            state.dirty = true;
            ActionResult::Nothing
        }
        Action::DismissField => {
            state.focus = Focus::Submit;
            state.dirty = true;
            ActionResult::Nothing
        }
        Action::Submit => submit(state),
        Action::ToggleTheme => {
            state.theme_mode = state.theme_mode.flipped();
            state.dirty = true;
            ActionResult::Nothing
        }
        Action::None => ActionResult::Nothing,
    }
}

/// Build the replacement text for the focused field and run it through the
/// field's edit rule. No-op when the button has focus.
fn edit_focused(state: &mut State, change: impl FnOnce(&mut String)) {
    let Focus::Field(key) = state.focus else {
        return;
    };
    let mut text = state.session.params().field(key).raw_text().to_string();
    change(&mut text);
    state.session.edit(key, &text);
    state.notice = None;
    state.dirty = true;
}

fn submit(state: &mut State) -> ActionResult {
    match state.session.submit() {
        Ok(ticket) => {
            state.notice = None;
            state.dirty = true;
            ActionResult::StartRequest(ticket)
        }
        // The button is already shown disabled
        Err(Rejection::Busy) => ActionResult::Nothing,
        Err(reason) => {
            state.notice = Some(reason.to_string());
            state.dirty = true;
            ActionResult::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use turbine_core::{Config, ParamKey, Phase};

    use super::*;

    fn state() -> State {
        State::new(Config::default())
    }

    fn raw(state: &State, key: ParamKey) -> String {
        state.session.params().field(key).raw_text().to_string()
    }

    #[test]
    fn typing_appends_and_clamps() {
        let mut s = state();
        s.focus = Focus::Field(ParamKey::Certainty);
        apply_action(&mut s, Action::InputChar('5'));
        assert_eq!(raw(&s, ParamKey::Certainty), "10");
    }

    #[test]
    fn letters_are_dropped() {
        let mut s = state();
        apply_action(&mut s, Action::ClearField);
        for c in "abc".chars() {
            apply_action(&mut s, Action::InputChar(c));
        }
        assert_eq!(raw(&s, ParamKey::Low), "");
    }

    #[test]
    fn backspace_to_empty_then_minus() {
        let mut s = state();
        apply_action(&mut s, Action::InputBackspace);
        assert_eq!(raw(&s, ParamKey::Low), "");
        apply_action(&mut s, Action::InputChar('-'));
        apply_action(&mut s, Action::InputChar('4'));
        assert_eq!(raw(&s, ParamKey::Low), "-4");
    }

    #[test]
    fn paste_goes_through_edit_rule() {
        let mut s = state();
        s.focus = Focus::Field(ParamKey::Delay);
        apply_action(&mut s, Action::ClearField);
        apply_action(&mut s, Action::InsertText("250ms".to_string()));
        assert_eq!(raw(&s, ParamKey::Delay), "250");
    }

    #[test]
    fn typing_on_button_changes_nothing() {
        let mut s = state();
        s.focus = Focus::Submit;
        apply_action(&mut s, Action::InputChar('9'));
        assert_eq!(raw(&s, ParamKey::Low), "1");
    }

    #[test]
    fn dismiss_moves_focus_to_button() {
        let mut s = state();
        apply_action(&mut s, Action::DismissField);
        assert_eq!(s.focus, Focus::Submit);
    }

    #[test]
    fn submit_starts_once() {
        let mut s = state();
        assert!(matches!(apply_action(&mut s, Action::Submit), ActionResult::StartRequest(_)));
        assert!(matches!(apply_action(&mut s, Action::Submit), ActionResult::Nothing));
        assert_eq!(s.session.phase(), &Phase::AwaitingReadiness);
        assert!(s.notice.is_none());
    }

    #[test]
    fn invalid_submit_sets_notice_until_next_edit() {
        let mut s = state();
        s.focus = Focus::Field(ParamKey::High);
        apply_action(&mut s, Action::ClearField);
        apply_action(&mut s, Action::InputChar('1'));
        assert!(matches!(apply_action(&mut s, Action::Submit), ActionResult::Nothing));
        assert_eq!(s.notice.as_deref(), Some("low must be less than high"));
        assert!(!s.session.is_busy());

        apply_action(&mut s, Action::InputChar('0'));
        assert!(s.notice.is_none());
    }

    #[test]
    fn theme_flips() {
        let mut s = state();
        let before = s.theme_mode;
        apply_action(&mut s, Action::ToggleTheme);
        assert_eq!(s.theme_mode, before.flipped());
    }
}
