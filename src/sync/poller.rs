//! Periodic re-sync of the selected account.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::{SyncEngine, SyncUpdate};
use crate::client::OrderSource;

const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// A running poll task for one account.
///
/// The first tick fires immediately and doubles as the initial sync.
/// Dropping the handle aborts the task, so no timer outlives the
/// selection that started it.
#[derive(Debug)]
pub struct PollHandle {
    account: String,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Starts polling `account` every `interval` with the non-forced path,
    /// forwarding every outcome to `tx`.
    ///
    /// Stops on its own once the receiver is dropped.
    pub fn spawn<S>(
        engine: Arc<SyncEngine<S>>,
        account: impl Into<String>,
        interval: Duration,
        tx: mpsc::UnboundedSender<SyncUpdate>,
    ) -> Self
    where
        S: OrderSource + 'static,
    {
        let account = account.into();
        let task_account = account.clone();
        info!(account = %account, interval_secs = interval.as_secs(), "Starting order polling");
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let outcome = engine.sync(&task_account, false).await;
                let update = SyncUpdate {
                    account: task_account.clone(),
                    outcome,
                };
                if tx.send(update).is_err() {
                    debug!(account = %task_account, "Sync receiver dropped, stopping poller");
                    break;
                }
            }
        });
        Self { account, task }
    }

    pub fn account(&self) -> &str {
        &self.account
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        debug!(account = %self.account, "Stopping order polling");
        self.task.abort();
    }
}
