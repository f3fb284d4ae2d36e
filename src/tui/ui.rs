//! Main UI rendering coordinator.

use ratatui::Frame;

use super::app::{App, Screen};
use super::screens::{dashboard, picker};
use crate::client::OrderSource;
use crate::session::Session;

/// Renders the entire application UI.
pub fn render<S: OrderSource + 'static>(frame: &mut Frame, app: &App, session: &Session<S>) {
    match app.screen {
        Screen::Picker => picker::render(frame, app, session),
        Screen::Dashboard => dashboard::render(frame, app, session),
    }
}
