//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::sync::SyncUpdate;

use super::app::{App, Screen};

/// Events that can occur in the terminal.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// Result of a background or polled sync.
    Sync(SyncUpdate),
}

/// Requests the main loop carries out against the session.
#[derive(Debug)]
pub enum Action {
    /// The search text changed.
    Search(String),
    /// Open the exhibitor at this index of the filtered list.
    Open(usize),
    /// Force a refresh of the tracked exhibitor.
    Refresh,
    /// Stop tracking and return to the picker.
    Back,
    /// Apply a sync result to the session.
    Apply(SyncUpdate),
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Forwards sync results from the session channel into the UI channel.
pub fn spawn_sync_forwarder(
    mut updates: mpsc::UnboundedReceiver<SyncUpdate>,
    tx: mpsc::UnboundedSender<Message>,
) {
    tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            if tx.send(Message::Sync(update)).is_err() {
                break;
            }
        }
    });
}

/// Updates UI state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Sync(update) => Some(Action::Apply(update)),
    }
}

fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Key(_) | Event::Resize(_, _) => None,
        Event::Tick => {
            app.on_tick();
            None
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }
    match app.screen {
        Screen::Picker => handle_picker_keys(app, key),
        Screen::Dashboard => handle_dashboard_keys(app, key),
    }
}

/// Every printable key edits the search, so quitting is Esc on an empty
/// search box.
fn handle_picker_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc if app.search.is_empty() => {
            app.should_quit = true;
            None
        }
        KeyCode::Esc => {
            app.search.clear();
            search_changed(app)
        }
        KeyCode::Up => {
            app.select_previous();
            None
        }
        KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Enter if app.list_len() > 0 => Some(Action::Open(app.list_index)),
        KeyCode::Char(c) => {
            app.search.insert(c);
            search_changed(app)
        }
        KeyCode::Backspace => {
            app.search.backspace();
            search_changed(app)
        }
        KeyCode::Delete => {
            app.search.delete();
            search_changed(app)
        }
        KeyCode::Left => {
            app.search.move_left();
            None
        }
        KeyCode::Right => {
            app.search.move_right();
            None
        }
        KeyCode::Home => {
            app.search.move_home();
            None
        }
        KeyCode::End => {
            app.search.move_end();
            None
        }
        _ => None,
    }
}

fn handle_dashboard_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('b') | KeyCode::Esc => {
            app.screen = Screen::Picker;
            Some(Action::Back)
        }
        _ => None,
    }
}

fn search_changed(app: &mut App) -> Option<Action> {
    app.list_index = 0;
    Some(Action::Search(app.search.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(app: &mut App, code: KeyCode) -> Option<Action> {
        update(
            app,
            Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    #[test]
    fn typing_in_picker_updates_search() {
        let mut app = App::new();
        key(&mut app, KeyCode::Char('q'));
        let action = key(&mut app, KeyCode::Char('u'));
        assert!(matches!(action, Some(Action::Search(term)) if term == "qu"));
        assert!(!app.should_quit);
    }

    #[test]
    fn enter_opens_highlighted_row() {
        let mut app = App::new();
        app.set_list_len(4);
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Down);
        assert!(matches!(key(&mut app, KeyCode::Enter), Some(Action::Open(2))));
    }

    #[test]
    fn enter_on_empty_list_does_nothing() {
        let mut app = App::new();
        app.set_list_len(0);
        assert!(key(&mut app, KeyCode::Enter).is_none());
    }

    #[test]
    fn esc_clears_search_then_quits() {
        let mut app = App::new();
        key(&mut app, KeyCode::Char('x'));
        key(&mut app, KeyCode::Esc);
        assert!(app.search.is_empty());
        assert!(!app.should_quit);
        key(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn dashboard_keys() {
        let mut app = App::new();
        app.screen = Screen::Dashboard;
        assert!(matches!(key(&mut app, KeyCode::Char('r')), Some(Action::Refresh)));
        assert!(matches!(key(&mut app, KeyCode::Char('b')), Some(Action::Back)));
        assert_eq!(app.screen, Screen::Picker);
        app.screen = Screen::Dashboard;
        key(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let mut app = App::new();
        update(
            &mut app,
            Message::Input(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(app.should_quit);
    }
}
