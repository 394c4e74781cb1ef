use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use super::theme;
use crate::state::State;

/// The value label. Its background carries the freshness color.
pub fn render_output(frame: &mut Frame, state: &State, area: Rect) {
    let palette = state.palette();
    let presentation = state.session.presentation();

    let block = Block::default().style(Style::default().bg(theme::output_bg(palette, presentation.color_token())));
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            presentation.display_value().to_string(),
            Style::default().fg(theme::text(palette)).bold(),
        )),
    ];
    if let Some(at) = presentation.updated_at() {
        lines.push(Line::from(Span::styled(
            format!("updated {}", at.format("%H:%M:%S")),
            Style::default().fg(theme::text_muted(palette)),
        )));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center).block(block), area);
}

pub fn render_history(frame: &mut Frame, state: &State, area: Rect) {
    let palette = state.palette();
    // Newest entry is already on the output label
    let earlier: Vec<Span> = state
        .session
        .presentation()
        .history()
        .skip(1)
        .map(|r| {
            let text = format!(" {} ({}) ", r.value, r.at.format("%H:%M:%S"));
            Span::styled(text, Style::default().fg(theme::text_muted(palette)))
        })
        .collect();
    if earlier.is_empty() || area.height == 0 {
        return;
    }
    let mut spans = vec![Span::styled(" earlier:", Style::default().fg(theme::text_muted(palette)))];
    spans.extend(earlier);
    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}
