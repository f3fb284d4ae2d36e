//! Terminal user interface.
//!
//! A picker screen to search and choose an exhibitor, and a dashboard
//! showing that exhibitor's orders and recent activity. All data comes from
//! the [`Session`]; this module only renders it and turns keys into
//! session calls.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod screens;
pub mod terminal;
pub mod ui;

use tokio::sync::mpsc;
use tracing::debug;

pub use app::{App, Screen};
pub use event::{Action, Event, Message};
pub use terminal::{TerminalGuard, Tui};
pub use ui::render;

use crate::client::OrderSource;
use crate::session::Session;
use crate::sync::SyncUpdate;
use crate::{Result, TrackerError};

/// UI tick interval, for the spinner and error expiry.
const TICK_MS: u64 = 250;

/// Runs the UI until the user quits.
///
/// `preselect` opens the dashboard for that exhibitor straight away.
///
/// # Errors
///
/// Returns [`TrackerError::Io`] if the terminal cannot be set up, drawn
/// to, or restored.
pub async fn run<S: OrderSource + 'static>(
    session: &mut Session<S>,
    updates: mpsc::UnboundedReceiver<SyncUpdate>,
    preselect: Option<&str>,
) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(tx.clone());
    event::spawn_tick_timer(tx.clone(), TICK_MS);
    event::spawn_sync_forwarder(updates, tx);

    let mut app = App::new();
    app.set_list_len(session.filtered_accounts().len());
    if let Some(name) = preselect {
        open(&mut app, session, name);
    }

    loop {
        guard
            .terminal()
            .draw(|frame| render(frame, &app, session))
            .map_err(|e| TrackerError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(action) = event::update(&mut app, message) {
            perform(&mut app, session, action);
        }
        if app.should_quit {
            break;
        }
    }

    session.stop_tracking();
    guard.restore()
}

/// Carries out an [`Action`] against the session.
pub fn perform<S: OrderSource + 'static>(app: &mut App, session: &mut Session<S>, action: Action) {
    match action {
        Action::Search(term) => {
            session.set_search(term);
            app.set_list_len(session.filtered_accounts().len());
        }
        Action::Open(index) => {
            let name = session
                .filtered_accounts()
                .get(index)
                .map(|e| e.name.clone());
            if let Some(name) = name {
                open(app, session, &name);
            }
        }
        Action::Refresh => {
            if !session.refresh() {
                debug!("Refresh unavailable");
            }
        }
        Action::Back => session.stop_tracking(),
        Action::Apply(update) => {
            session.apply(update);
        }
    }
}

fn open<S: OrderSource + 'static>(app: &mut App, session: &mut Session<S>, name: &str) {
    match session.select(name) {
        Ok(()) => {
            session.start_tracking();
            app.screen = Screen::Dashboard;
        }
        Err(e) => app.show_error(e.to_string()),
    }
}
