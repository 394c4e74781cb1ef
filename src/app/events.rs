use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::actions::Action;
use crate::state::{Focus, State};

/// Map a terminal event to an action. `None` means quit.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(key, state),
        // Normalize line endings; the edit rule drops them anyway
        Event::Paste(text) => {
            let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
            Some(Action::InsertText(normalized))
        }
        _ => Some(Action::None),
    }
}

fn handle_key(key: &KeyEvent, state: &State) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return Some(Action::None);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => None,
            KeyCode::Char('r') => Some(Action::Submit),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('u') => Some(Action::ClearField),
            _ => Some(Action::None),
        };
    }

    let action = match key.code {
        KeyCode::Esc => return None,
        KeyCode::Enter if state.focus == Focus::Submit => Action::Submit,
        KeyCode::Enter => Action::DismissField,
        KeyCode::Tab | KeyCode::Down => Action::FocusNext,
        KeyCode::BackTab | KeyCode::Up => Action::FocusPrev,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Char(' ') if state.focus == Focus::Submit => Action::Submit,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use turbine_core::Config;

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, state: KeyEventState::NONE })
    }

    fn plain(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_edit_focused_field() {
        let state = State::new(Config::default());
        assert_eq!(handle_event(&plain(KeyCode::Char('7')), &state), Some(Action::InputChar('7')));
    }

    #[test]
    fn enter_depends_on_focus() {
        let mut state = State::new(Config::default());
        assert_eq!(handle_event(&plain(KeyCode::Enter), &state), Some(Action::DismissField));
        state.focus = Focus::Submit;
        assert_eq!(handle_event(&plain(KeyCode::Enter), &state), Some(Action::Submit));
    }

    #[test]
    fn ctrl_shortcuts() {
        let state = State::new(Config::default());
        assert_eq!(handle_event(&key(KeyCode::Char('r'), KeyModifiers::CONTROL), &state), Some(Action::Submit));
        assert_eq!(handle_event(&key(KeyCode::Char('t'), KeyModifiers::CONTROL), &state), Some(Action::ToggleTheme));
        assert_eq!(handle_event(&key(KeyCode::Char('q'), KeyModifiers::CONTROL), &state), None);
    }

    #[test]
    fn escape_quits() {
        let state = State::new(Config::default());
        assert_eq!(handle_event(&plain(KeyCode::Esc), &state), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let state = State::new(Config::default());
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('3'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(handle_event(&release, &state), Some(Action::None));
    }

    #[test]
    fn paste_normalizes_line_endings() {
        let state = State::new(Config::default());
        let paste = Event::Paste("12\r\n".to_string());
        assert_eq!(handle_event(&paste, &state), Some(Action::InsertText("12\n".to_string())));
    }
}
