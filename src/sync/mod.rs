//! Order synchronization.
//!
//! [`SyncEngine`] keeps one cached [`OrderSnapshot`] per tracked account,
//! fetching through an [`OrderSource`](crate::client::OrderSource) and
//! substituting synthesized orders when the fetch fails. [`PollHandle`]
//! drives the engine on a timer.

pub mod engine;
pub mod fallback;
pub mod poller;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{Notification, Order, OrderSummary};

pub use engine::SyncEngine;
pub use fallback::fallback_orders;
pub use poller::PollHandle;

/// Whether a snapshot holds remote data or synthesized orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    Remote,
    Fallback,
}

/// The result of one sync for one account, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSnapshot {
    pub account: String,
    /// Sorted by status priority.
    pub orders: Vec<Order>,
    /// At most three entries.
    pub notifications: Vec<Notification>,
    /// Server-reported update time, or the sync time if absent.
    pub last_updated: DateTime<Utc>,
    pub origin: SnapshotOrigin,
}

impl OrderSnapshot {
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_orders(&self.orders)
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == SnapshotOrigin::Fallback
    }
}

/// Cached state for one account.
#[derive(Debug, Clone)]
pub struct SyncState {
    /// When the snapshot was stored, by the engine clock.
    pub last_synced: DateTime<Utc>,
    pub snapshot: Arc<OrderSnapshot>,
}

/// What a call to [`SyncEngine::sync`] did.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// Fetched (or synthesized) and stored a new snapshot.
    Synced(Arc<OrderSnapshot>),
    /// Returned the cached snapshot without a request.
    Reused(Arc<OrderSnapshot>),
    /// Another sync was already in flight; nothing happened.
    Skipped,
    /// The selection changed while fetching; the result was discarded.
    Stale { account: String },
}

impl SyncOutcome {
    /// The snapshot to display, if this outcome produced one.
    pub fn snapshot(&self) -> Option<&Arc<OrderSnapshot>> {
        match self {
            Self::Synced(snapshot) | Self::Reused(snapshot) => Some(snapshot),
            Self::Skipped | Self::Stale { .. } => None,
        }
    }
}

/// An outcome forwarded by the poller, tagged with the account it was for.
#[derive(Debug, Clone)]
pub struct SyncUpdate {
    pub account: String,
    pub outcome: SyncOutcome,
}
