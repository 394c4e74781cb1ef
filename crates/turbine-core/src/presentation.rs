//! What the output label shows: the current value and its color slot.
use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::config::{Palette, RgbColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Slot in the two-color freshness cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorToken {
    #[default]
    A,
    B,
}

impl ColorToken {
    pub fn toggled(self) -> Self {
        match self {
            ColorToken::A => ColorToken::B,
            ColorToken::B => ColorToken::A,
        }
    }
}

/// Resolve a token against an explicit palette snapshot.
pub fn token_color(palette: &Palette, token: ColorToken) -> RgbColor {
    match token {
        ColorToken::A => palette.primary,
        ColorToken::B => palette.alternate,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub value: i64,
    pub at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct PresentationState {
    display_value: String,
    color_token: ColorToken,
    updated_at: Option<DateTime<Local>>,
    history: VecDeque<ResultRecord>,
    history_len: usize,
}

impl PresentationState {
    pub fn new(placeholder: impl Into<String>, history_len: usize) -> Self {
        Self {
            display_value: placeholder.into(),
            color_token: ColorToken::default(),
            updated_at: None,
            history: VecDeque::with_capacity(history_len),
            history_len,
        }
    }

    pub fn display_value(&self) -> &str {
        &self.display_value
    }

    pub fn color_token(&self) -> ColorToken {
        self.color_token
    }

    /// Local time of the last successful result
    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }

    /// Recent successful results, newest first
    pub fn history(&self) -> impl Iterator<Item = &ResultRecord> {
        self.history.iter()
    }

    pub fn toggle(&mut self) {
        self.color_token = self.color_token.toggled();
    }

    pub(crate) fn set_label(&mut self, text: impl Into<String>) {
        self.display_value = text.into();
    }

    /// Success path: show the value, flip the color, remember it.
    pub(crate) fn show_result(&mut self, value: i64) {
        let now = Local::now();
        self.display_value = value.to_string();
        self.toggle();
        self.updated_at = Some(now);
        if self.history_len == 0 {
            return;
        }
        if self.history.len() == self.history_len {
            self.history.pop_back();
        }
        self.history.push_front(ResultRecord { value, at: now });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn toggle_is_a_two_cycle() {
        let mut state = PresentationState::new("Global", 3);
        assert_eq!(state.color_token(), ColorToken::A);
        state.toggle();
        assert_eq!(state.color_token(), ColorToken::B);
        state.toggle();
        assert_eq!(state.color_token(), ColorToken::A);
    }

    #[test]
    fn palette_slots_per_theme() {
        let palettes = Config::default().palettes;
        assert_eq!(token_color(palettes.get(ThemeMode::Light), ColorToken::A), [255, 255, 255]);
        assert_eq!(token_color(palettes.get(ThemeMode::Light), ColorToken::B), [221, 221, 221]);
        assert_eq!(token_color(palettes.get(ThemeMode::Dark), ColorToken::A), [0, 0, 0]);
        assert_eq!(token_color(palettes.get(ThemeMode::Dark), ColorToken::B), [34, 34, 34]);
    }

    #[test]
    fn result_updates_value_and_history() {
        let mut state = PresentationState::new("Global", 2);
        state.show_result(3);
        state.show_result(8);
        state.show_result(1);
        assert_eq!(state.display_value(), "1");
        assert_eq!(state.color_token(), ColorToken::B);
        assert!(state.updated_at().is_some());
        let values: Vec<i64> = state.history().map(|r| r.value).collect();
        assert_eq!(values, vec![1, 8]);
    }

    #[test]
    fn zero_history_keeps_nothing() {
        let mut state = PresentationState::new("Global", 0);
        state.show_result(4);
        assert_eq!(state.history().count(), 0);
        assert_eq!(state.display_value(), "4");
    }

    #[test]
    fn label_does_not_toggle() {
        let mut state = PresentationState::new("Global", 1);
        state.set_label("Failed");
        assert_eq!(state.display_value(), "Failed");
        assert_eq!(state.color_token(), ColorToken::A);
        assert!(state.updated_at().is_none());
    }
}
