//! Exhibitor order tracking client library.
//!
//! Loads the exhibitor directory, keeps the selected exhibitor's orders in
//! sync with the order service (cached, polled, and force-refreshable),
//! and derives the priority-sorted order list and recent-activity
//! notifications shown by the terminal front-end. Remote failures degrade
//! to fixed or synthesized fallback data instead of errors.

pub mod client;
pub mod clock;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod notifications;
pub mod ordering;
pub mod session;
pub mod sync;
pub mod taxonomy;
pub mod tui;

pub use error::{Result, TrackerError};
