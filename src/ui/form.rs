use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::theme;
use crate::state::{Focus, State};

pub fn render_fields(frame: &mut Frame, state: &State, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); 4])
        .split(area);

    for ((key, field), row) in state.session.params().iter().zip(rows.iter()) {
        let focused = state.focus == Focus::Field(key);
        render_field(frame, state, field.label(), field.raw_text(), focused, *row);
    }
}

fn render_field(frame: &mut Frame, state: &State, label: &str, text: &str, focused: bool, area: Rect) {
    let palette = state.palette();
    let border = if focused { theme::text(palette) } else { theme::text_muted(palette) };
    let block = Block::bordered()
        .title(Line::from(format!(" {} ", label)).centered())
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme::input_bg(palette)).fg(theme::text(palette)));

    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(text.to_string()).alignment(Alignment::Center).block(block), area);

    if focused && inner.width > 0 {
        // Cursor sits right after the centered text
        let width = (text.width() as u16).min(inner.width);
        let x = inner.x + (inner.width - width) / 2 + width;
        frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

pub fn render_submit(frame: &mut Frame, state: &State, area: Rect) {
    let palette = state.palette();
    let busy = state.session.is_busy();
    let focused = state.focus == Focus::Submit;

    // Muted while a request runs or the values would be rejected
    let mut label_style = Style::default().fg(theme::button_fg(palette, !state.session.is_eligible()));
    if focused && !busy {
        label_style = label_style.bold();
    }
    let border = if focused { theme::text(palette) } else { theme::button_bg(palette, busy) };
    let block = Block::bordered()
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme::button_bg(palette, busy)));

    let label = Line::from(Span::styled(state.session.labels().submit.clone(), label_style));
    frame.render_widget(Paragraph::new(label).alignment(Alignment::Center).block(block), area);
}
