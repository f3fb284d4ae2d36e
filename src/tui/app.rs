//! UI-only state for the TUI.
//!
//! Everything about exhibitors and orders lives in the
//! [`Session`](crate::session::Session); `App` only tracks which screen is
//! shown, the search box, the list cursor and transient messages.

use std::time::{Duration, Instant};

use super::input::TextInput;

/// How long an error stays in the status bar.
const ERROR_TIMEOUT: Duration = Duration::from_secs(5);

/// Frames of the "syncing" spinner.
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// The screen currently shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    /// Exhibitor search and selection.
    #[default]
    Picker,
    /// Order dashboard for the selected exhibitor.
    Dashboard,
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    pub message: String,
    pub timestamp: Instant,
}

/// Central TUI state container.
#[derive(Debug, Default)]
pub struct App {
    pub screen: Screen,
    /// Search box on the picker screen.
    pub search: TextInput,
    /// Highlighted row in the filtered exhibitor list.
    pub list_index: usize,
    /// Length of the filtered list, refreshed after every search change.
    list_len: usize,
    /// Error message to display (clears after timeout).
    pub error_message: Option<ErrorDisplay>,
    /// Advanced on every tick; drives the spinner.
    pub ticks: u64,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the length of the filtered list and clamps the cursor.
    pub fn set_list_len(&mut self, len: usize) {
        self.list_len = len;
        self.list_index = self.list_index.min(len.saturating_sub(1));
    }

    pub fn list_len(&self) -> usize {
        self.list_len
    }

    pub fn select_next(&mut self) {
        if self.list_index + 1 < self.list_len {
            self.list_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.list_index = self.list_index.saturating_sub(1);
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than five seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > ERROR_TIMEOUT
        {
            self.error_message = None;
        }
    }

    pub fn on_tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        self.clear_stale_errors();
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[(self.ticks % SPINNER.len() as u64) as usize]
    }
}
