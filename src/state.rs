use turbine_core::config::Palette;
use turbine_core::presentation::ThemeMode;
use turbine_core::{Config, ParamKey, Session};

/// Which control receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(ParamKey),
    Submit,
}

impl Focus {
    /// Fields in display order, then the submit button, wrapping around.
    const ORDER: [Focus; 5] = [
        Focus::Field(ParamKey::Low),
        Focus::Field(ParamKey::High),
        Focus::Field(ParamKey::Certainty),
        Focus::Field(ParamKey::Delay),
        Focus::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

pub struct State {
    pub session: Session,
    pub config: Config,
    pub focus: Focus,
    pub theme_mode: ThemeMode,
    /// Why the last submit did not start, until the next edit
    pub notice: Option<String>,
    pub spinner_frame: usize,
    /// Needs a redraw
    pub dirty: bool,
}

impl State {
    pub fn new(config: Config) -> Self {
        Self {
            session: Session::new(&config),
            theme_mode: config.presentation.theme,
            config,
            focus: Focus::Field(ParamKey::Low),
            notice: None,
            spinner_frame: 0,
            dirty: true,
        }
    }

    pub fn palette(&self) -> &Palette {
        self.config.palettes.get(self.theme_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_all_controls() {
        let mut focus = Focus::Field(ParamKey::Low);
        let mut seen = vec![focus];
        for _ in 0..4 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(seen, Focus::ORDER.to_vec());
        assert_eq!(focus.next(), Focus::Field(ParamKey::Low));
        assert_eq!(Focus::Field(ParamKey::Low).prev(), Focus::Submit);
    }

    #[test]
    fn starts_with_configured_theme() {
        let mut config = Config::default();
        config.presentation.theme = ThemeMode::Light;
        let state = State::new(config);
        assert_eq!(state.theme_mode, ThemeMode::Light);
        assert_eq!(state.palette().primary, [255, 255, 255]);
    }
}
