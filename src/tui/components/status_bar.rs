//! Status bar component.

use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::client::OrderSource;
use crate::session::Session;
use crate::tui::app::App;

/// Renders the status bar.
pub fn render<S: OrderSource + 'static>(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    session: &Session<S>,
) {
    let (system_label, system_color) = if session.system_online() {
        (" System Online ", Color::Green)
    } else {
        (" System Offline ", Color::Red)
    };

    let directory_span = if session.directory().is_fallback() {
        Span::styled(" Offline directory ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("")
    };

    let sync_span = if session.is_synchronizing() {
        Span::styled(
            format!(" {} Syncing ", app.spinner()),
            Style::default().fg(Color::Cyan),
        )
    } else {
        match session.last_synced() {
            Some(at) => Span::styled(
                format!(" Updated {} ", at.with_timezone(&Local).format("%H:%M:%S")),
                Style::default().fg(Color::White),
            ),
            None => Span::raw(""),
        }
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        Span::styled(system_label, Style::default().fg(system_color)),
        Span::raw("│"),
        directory_span,
        sync_span,
        Span::raw("│"),
        error_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
