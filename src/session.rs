//! Session state exposed to the presentation layer.
//!
//! A [`Session`] owns everything that changes while the app runs: the
//! directory, the search term, the selected account, the displayed
//! snapshot, and the poll task. Front-ends read from it and feed it the
//! [`SyncUpdate`]s arriving on the channel returned at construction.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::OrderSource;
use crate::directory::Directory;
use crate::models::{Exhibitor, Notification, Order, OrderSummary, SystemStatus};
use crate::sync::{OrderSnapshot, PollHandle, SyncEngine, SyncOutcome, SyncUpdate};
use crate::{Result, TrackerError};

pub struct Session<S> {
    engine: Arc<SyncEngine<S>>,
    directory: Directory,
    search: String,
    selected: Option<String>,
    snapshot: Option<Arc<OrderSnapshot>>,
    last_synced: Option<DateTime<Utc>>,
    system: SystemStatus,
    poll_interval: Duration,
    poller: Option<PollHandle>,
    updates: mpsc::UnboundedSender<SyncUpdate>,
}

impl<S: OrderSource + 'static> Session<S> {
    /// Loads the directory and probes the service health concurrently.
    ///
    /// Neither can fail: the directory falls back to its fixed list and an
    /// unreachable service is reported as offline.
    pub async fn bootstrap(
        engine: Arc<SyncEngine<S>>,
        poll_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SyncUpdate>) {
        let source = Arc::clone(engine.source());
        let (directory, status) = tokio::join!(
            Directory::load(source.as_ref(), false),
            source.system_status()
        );
        let system = status.unwrap_or_else(|e| {
            warn!(error = %e, "Health probe failed");
            SystemStatus::unreachable()
        });
        info!(
            accounts = directory.len(),
            fallback = directory.is_fallback(),
            online = system.reachable,
            "Session ready"
        );
        let (mut session, rx) = Self::with_directory(engine, directory, poll_interval);
        session.system = system;
        (session, rx)
    }

    /// Creates a session over an already-loaded directory.
    pub fn with_directory(
        engine: Arc<SyncEngine<S>>,
        directory: Directory,
        poll_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SyncUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            engine,
            directory,
            search: String::new(),
            selected: None,
            snapshot: None,
            last_synced: None,
            system: SystemStatus::unreachable(),
            poll_interval,
            poller: None,
            updates: tx,
        };
        (session, rx)
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Accounts matching the current search term, in directory order.
    pub fn filtered_accounts(&self) -> Vec<&Exhibitor> {
        self.directory.search(&self.search)
    }

    /// Switches to `name`, stopping any tracking of the previous account.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownExhibitor`] if `name` is not in the
    /// directory. The current selection is left untouched.
    pub fn select(&mut self, name: &str) -> Result<()> {
        if self.directory.find(name).is_none() {
            return Err(TrackerError::UnknownExhibitor(name.to_string()));
        }
        self.poller = None;
        self.snapshot = None;
        self.last_synced = None;
        self.engine.select(Some(name));
        self.selected = Some(name.to_string());
        info!(exhibitor = name, "Selected exhibitor");
        Ok(())
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_exhibitor(&self) -> Option<&Exhibitor> {
        self.directory.find(self.selected.as_deref()?)
    }

    /// Starts polling the selected account. The first poll runs at once.
    ///
    /// Returns `false` if nothing is selected.
    pub fn start_tracking(&mut self) -> bool {
        let Some(account) = self.selected.clone() else {
            return false;
        };
        self.poller = Some(PollHandle::spawn(
            Arc::clone(&self.engine),
            account,
            self.poll_interval,
            self.updates.clone(),
        ));
        true
    }

    /// Ends tracking: cancels polling and clears the selection and view.
    pub fn stop_tracking(&mut self) {
        if let Some(account) = self.selected.take() {
            info!(exhibitor = %account, "Stopped tracking");
        }
        self.poller = None;
        self.snapshot = None;
        self.last_synced = None;
        self.engine.select(None);
    }

    pub fn is_tracking(&self) -> bool {
        self.poller.is_some()
    }

    /// Starts a forced sync of the selected account in the background.
    ///
    /// Returns `false` without doing anything if nothing is selected or a
    /// sync is already in flight. The result arrives as a [`SyncUpdate`].
    pub fn refresh(&self) -> bool {
        let Some(account) = self.selected.clone() else {
            return false;
        };
        if self.engine.is_syncing() {
            debug!(exhibitor = %account, "Refresh ignored, sync in flight");
            return false;
        }
        let engine = Arc::clone(&self.engine);
        let tx = self.updates.clone();
        tokio::spawn(async move {
            let outcome = engine.sync(&account, true).await;
            let _ = tx.send(SyncUpdate { account, outcome });
        });
        true
    }

    /// Syncs the selected account inline and applies the result.
    ///
    /// Returns `None` if nothing is selected.
    pub async fn sync_now(&mut self, force_refresh: bool) -> Option<SyncOutcome> {
        let account = self.selected.clone()?;
        let outcome = self.engine.sync(&account, force_refresh).await;
        self.apply(SyncUpdate {
            account,
            outcome: outcome.clone(),
        });
        Some(outcome)
    }

    /// Applies a sync result. Returns whether the view changed.
    ///
    /// Updates for an account other than the current selection are
    /// dropped.
    pub fn apply(&mut self, update: SyncUpdate) -> bool {
        if self.selected.as_deref() != Some(update.account.as_str()) {
            debug!(exhibitor = %update.account, "Dropping update for deselected exhibitor");
            return false;
        }
        let Some(snapshot) = update.outcome.snapshot() else {
            return false;
        };
        self.last_synced = self
            .engine
            .cached(&update.account)
            .map(|state| state.last_synced)
            .or(self.last_synced);
        self.snapshot = Some(Arc::clone(snapshot));
        true
    }

    pub fn is_synchronizing(&self) -> bool {
        self.engine.is_syncing()
    }

    pub fn snapshot(&self) -> Option<&OrderSnapshot> {
        self.snapshot.as_deref()
    }

    /// Displayed orders, highest priority first.
    pub fn orders(&self) -> &[Order] {
        match &self.snapshot {
            Some(snapshot) => &snapshot.orders,
            None => &[],
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        match &self.snapshot {
            Some(snapshot) => &snapshot.notifications,
            None => &[],
        }
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_orders(self.orders())
    }

    /// When the displayed snapshot was last stored.
    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.last_synced
    }

    pub fn system_online(&self) -> bool {
        self.system.reachable
    }

    pub fn system_status(&self) -> &SystemStatus {
        &self.system
    }
}
