mod form;
mod output;
mod spinner;
mod theme;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::state::State;

pub fn render(frame: &mut Frame, state: &State) {
    let area = frame.area();
    let palette = state.palette();

    // Fill base background
    frame.render_widget(Block::default().style(Style::default().bg(theme::background(palette))), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Output label
            Constraint::Length(1), // Progress indicator
            Constraint::Length(12), // Four fields
            Constraint::Length(3), // Submit button
            Constraint::Min(0),    // Recent results
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    output::render_output(frame, state, layout[0]);
    render_progress(frame, state, layout[1]);
    form::render_fields(frame, state, layout[2]);
    form::render_submit(frame, state, layout[3]);
    output::render_history(frame, state, layout[4]);
    render_status_bar(frame, state, layout[5]);
}

/// Indeterminate progress, only while a request is in flight.
fn render_progress(frame: &mut Frame, state: &State, area: Rect) {
    if !state.session.is_busy() {
        return;
    }
    let palette = state.palette();
    let line = Line::from(Span::styled(
        spinner::spinner(state.spinner_frame),
        Style::default().fg(theme::spinner(palette)).bold(),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let palette = state.palette();
    let line = match &state.notice {
        Some(notice) => {
            Line::from(Span::styled(format!(" {} ", notice), Style::default().fg(theme::notice(palette)).bold()))
        }
        None => Line::from(Span::styled(
            " Tab move · Enter next/run · Ctrl+R run · Ctrl+T theme · Esc quit ",
            Style::default().fg(theme::text_muted(palette)),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use ratatui::buffer::Buffer;
    use ratatui::{Terminal, backend::TestBackend};
    use turbine_core::{Config, LifecycleEvent, LifecycleEventKind, QueryOutcome};

    use super::*;

    const WIDTH: u16 = 80;
    const OUTPUT_VALUE_ROW: u16 = 1;
    const PROGRESS_ROW: u16 = 5;
    const SUBMIT_LABEL_ROW: u16 = 19;

    fn draw(state: &State) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, 30)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen(state: &State) -> String {
        draw(state).content.iter().map(|cell| cell.symbol()).collect()
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..WIDTH).map(|x| buffer[(x, y)].symbol()).collect()
    }

    /// Foreground of the first cell showing `symbol` on row `y`.
    fn fg_of(buffer: &Buffer, y: u16, symbol: &str) -> Option<Color> {
        (0..WIDTH).map(|x| &buffer[(x, y)]).find(|cell| cell.symbol() == symbol).map(|cell| cell.fg)
    }

    #[test]
    fn shows_placeholder_fields_and_button() {
        let state = State::new(Config::default());
        let text = screen(&state);
        for expected in ["Global", "Low", "High", "Certainty", "Delay", "Run", "100"] {
            assert!(text.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn notice_replaces_key_hints() {
        let mut state = State::new(Config::default());
        state.notice = Some("low must be less than high".to_string());
        let text = screen(&state);
        assert!(text.contains("low must be less than high"));
        assert!(!text.contains("Ctrl+T"));
    }

    #[test]
    fn spinner_shows_only_while_busy() {
        let mut state = State::new(Config::default());
        assert_eq!(row(&draw(&state), PROGRESS_ROW).trim(), "");

        let ticket = state.session.submit().unwrap();
        let busy = draw(&state);
        assert_eq!(row(&busy, PROGRESS_ROW).trim(), "|");
        assert_eq!(row(&busy, OUTPUT_VALUE_ROW).trim(), "Turbine...");

        let resolved = LifecycleEventKind::Resolved(QueryOutcome::Success(6));
        state.session.apply(LifecycleEvent { id: ticket.id, kind: LifecycleEventKind::Ready });
        state.session.apply(LifecycleEvent { id: ticket.id, kind: resolved });
        let done = draw(&state);
        assert_eq!(row(&done, PROGRESS_ROW).trim(), "");
        assert_eq!(row(&done, OUTPUT_VALUE_ROW).trim(), "6");
    }

    #[test]
    fn submit_label_is_muted_while_busy() {
        let mut state = State::new(Config::default());
        let palette = state.palette().clone();
        assert!(row(&draw(&state), SUBMIT_LABEL_ROW).contains("Run"));
        assert_eq!(fg_of(&draw(&state), SUBMIT_LABEL_ROW, "R"), Some(theme::text(&palette)));

        state.session.submit().unwrap();
        let busy = draw(&state);
        assert!(row(&busy, SUBMIT_LABEL_ROW).contains("Run"));
        assert_eq!(fg_of(&busy, SUBMIT_LABEL_ROW, "R"), Some(theme::text_muted(&palette)));
    }
}
