//! Palette lookups. Every helper takes the palette snapshot explicitly.
use ratatui::style::Color;
use turbine_core::config::{Palette, RgbColor};
use turbine_core::presentation::{ColorToken, token_color};

fn rgb(c: RgbColor) -> Color {
    Color::Rgb(c[0], c[1], c[2])
}

pub fn background(palette: &Palette) -> Color {
    rgb(palette.primary)
}

/// Background of the output label for the given freshness slot
pub fn output_bg(palette: &Palette, token: ColorToken) -> Color {
    rgb(token_color(palette, token))
}

pub fn text(palette: &Palette) -> Color {
    rgb(palette.text)
}

pub fn text_muted(palette: &Palette) -> Color {
    rgb(palette.text_muted)
}

pub fn input_bg(palette: &Palette) -> Color {
    rgb(palette.input_bg)
}

pub fn button_bg(palette: &Palette, busy: bool) -> Color {
    rgb(if busy { palette.button_bg_busy } else { palette.button_bg })
}

pub fn button_fg(palette: &Palette, disabled: bool) -> Color {
    rgb(if disabled { palette.text_muted } else { palette.text })
}

pub fn spinner(palette: &Palette) -> Color {
    rgb(palette.spinner)
}

pub fn notice(palette: &Palette) -> Color {
    rgb(palette.notice)
}
