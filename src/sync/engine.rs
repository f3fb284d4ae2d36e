//! The single-flight, cache-or-fetch sync engine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::fallback::fallback_orders;
use super::{OrderSnapshot, SnapshotOrigin, SyncOutcome, SyncState};
use crate::Result;
use crate::client::OrderSource;
use crate::clock::Clock;
use crate::models::OrdersResponse;
use crate::{notifications, ordering};

/// Fetches, caches and post-processes orders for the tracked account.
///
/// At most one sync runs at a time across the whole engine; a call made
/// while another is in flight returns [`SyncOutcome::Skipped`] without
/// touching any state. Calls are not queued.
pub struct SyncEngine<S> {
    source: Arc<S>,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
    cache_ttl: Duration,
    in_flight: AtomicBool,
    /// Bumped on every selection change; fetches that straddle a bump are
    /// discarded.
    epoch: AtomicU64,
    states: Mutex<CacheState>,
}

/// Cached snapshots plus the selection that decides which may be kept.
#[derive(Default)]
struct CacheState {
    selection: Selection,
    entries: HashMap<String, SyncState>,
}

#[derive(Default)]
enum Selection {
    /// No selection made yet; any account may be cached.
    #[default]
    Unset,
    Account(String),
    Cleared,
}

impl CacheState {
    fn admits(&self, account: &str) -> bool {
        match &self.selection {
            Selection::Unset => true,
            Selection::Account(selected) => selected == account,
            Selection::Cleared => false,
        }
    }
}

/// Holds the in-flight flag and clears it when dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: OrderSource> SyncEngine<S> {
    /// Creates an engine. A zero `cache_ttl` disables snapshot reuse.
    pub fn new(source: Arc<S>, clock: Arc<dyn Clock>, rng: StdRng, cache_ttl: Duration) -> Self {
        Self {
            source,
            clock,
            rng: Mutex::new(rng),
            cache_ttl,
            in_flight: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            states: Mutex::new(CacheState::default()),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Synchronizes `account`.
    ///
    /// A non-forced call reuses a cached snapshot younger than the cache
    /// TTL. Otherwise the orders are fetched, with the cache-bypass flag
    /// when `force_refresh` is set. A failed fetch yields synthesized
    /// orders instead of an error. The result is sorted by status
    /// priority, given notifications, and cached unless the selection
    /// changed while the fetch was pending.
    pub async fn sync(&self, account: &str, force_refresh: bool) -> SyncOutcome {
        // Taken first: any later selection change invalidates this result.
        let epoch = self.epoch.load(Ordering::Acquire);
        let Some(_guard) = InFlightGuard::claim(&self.in_flight) else {
            debug!(account, force_refresh, "Sync already in flight, skipping");
            return SyncOutcome::Skipped;
        };

        if !force_refresh && let Some(snapshot) = self.fresh_snapshot(account) {
            debug!(account, "Reusing cached snapshot");
            return SyncOutcome::Reused(snapshot);
        }

        let fetched = self.source.orders(account, force_refresh).await;
        let now = self.clock.now();
        let snapshot = Arc::new(self.build_snapshot(account, fetched, now));

        if !self.store(account, epoch, now, Arc::clone(&snapshot)) {
            info!(account, "Account deselected during sync, discarding result");
            return SyncOutcome::Stale {
                account: account.to_string(),
            };
        }
        info!(
            account,
            orders = snapshot.orders.len(),
            origin = ?snapshot.origin,
            "Synced orders"
        );
        SyncOutcome::Synced(snapshot)
    }

    /// Records a selection change.
    ///
    /// Any fetch pending at this point will be discarded on completion.
    /// Cached snapshots of accounts other than `account` are dropped and
    /// results for them are no longer stored; `None` drops them all.
    pub fn select(&self, account: Option<&str>) {
        let mut states = lock(&self.states);
        self.epoch.fetch_add(1, Ordering::AcqRel);
        states.selection = match account {
            Some(name) => Selection::Account(name.to_string()),
            None => Selection::Cleared,
        };
        states
            .entries
            .retain(|name, _| Some(name.as_str()) == account);
        debug!(?account, "Selection changed");
    }

    /// Whether a sync is currently in flight.
    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The cached state for `account`, if any.
    pub fn cached(&self, account: &str) -> Option<SyncState> {
        lock(&self.states).entries.get(account).cloned()
    }

    fn fresh_snapshot(&self, account: &str) -> Option<Arc<OrderSnapshot>> {
        if self.cache_ttl.is_zero() {
            return None;
        }
        let now = self.clock.now();
        let states = lock(&self.states);
        let state = states.entries.get(account)?;
        let age = (now - state.last_synced).to_std().ok()?;
        (age < self.cache_ttl).then(|| Arc::clone(&state.snapshot))
    }

    fn build_snapshot(
        &self,
        account: &str,
        fetched: Result<OrdersResponse>,
        now: DateTime<Utc>,
    ) -> OrderSnapshot {
        let mut rng = lock(&self.rng);
        let (orders, last_updated, origin) = match fetched {
            Ok(response) => {
                let last_updated = response.last_updated_or(now);
                (response.into_orders(), last_updated, SnapshotOrigin::Remote)
            }
            Err(e) => {
                warn!(account, error = %e, "Order fetch failed, using fallback orders");
                let orders = fallback_orders(account, &mut *rng, now.date_naive());
                (orders, now, SnapshotOrigin::Fallback)
            }
        };
        let orders = ordering::sort_by_priority(orders);
        let notifications = notifications::derive(&orders, &mut *rng);
        OrderSnapshot {
            account: account.to_string(),
            orders,
            notifications,
            last_updated,
            origin,
        }
    }

    /// Stores the snapshot if no selection change happened since `epoch`
    /// and `account` is still the one selected.
    fn store(
        &self,
        account: &str,
        epoch: u64,
        now: DateTime<Utc>,
        snapshot: Arc<OrderSnapshot>,
    ) -> bool {
        let mut states = lock(&self.states);
        if self.epoch.load(Ordering::Acquire) != epoch || !states.admits(account) {
            return false;
        }
        states.entries.insert(
            account.to_string(),
            SyncState {
                last_synced: now,
                snapshot,
            },
        );
        true
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrackerError;
    use crate::clock::{FixedClock, seeded_rng};
    use crate::models::{Exhibitor, SystemStatus};
    use chrono::TimeZone;

    /// Answers every order request with the same empty list, or fails.
    struct StaticSource {
        fail: bool,
    }

    impl OrderSource for StaticSource {
        async fn exhibitors(&self, _force_refresh: bool) -> Result<Vec<Exhibitor>> {
            Ok(Vec::new())
        }

        async fn orders(&self, _exhibitor: &str, _force_refresh: bool) -> Result<OrdersResponse> {
            if self.fail {
                return Err(TrackerError::MalformedPayload("boom".to_string()));
            }
            Ok(OrdersResponse {
                orders: None,
                last_updated: None,
            })
        }

        async fn system_status(&self) -> Result<SystemStatus> {
            Ok(SystemStatus::unreachable())
        }
    }

    fn engine(fail: bool, ttl: Duration) -> (SyncEngine<StaticSource>, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 6, 14, 9, 0, 0).unwrap(),
        ));
        let engine = SyncEngine::new(
            Arc::new(StaticSource { fail }),
            clock.clone(),
            seeded_rng(5),
            ttl,
        );
        (engine, clock)
    }

    #[test]
    fn guard_claims_once_and_releases_on_drop() {
        let flag = AtomicBool::new(false);
        let guard = InFlightGuard::claim(&flag).unwrap();
        assert!(InFlightGuard::claim(&flag).is_none());
        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(InFlightGuard::claim(&flag).is_some());
    }

    #[tokio::test]
    async fn empty_remote_result_is_a_success() {
        let (engine, clock) = engine(false, Duration::ZERO);
        let outcome = engine.sync("Costa Rica", false).await;
        let snapshot = outcome.snapshot().unwrap();
        assert!(matches!(outcome, SyncOutcome::Synced(_)));
        assert!(snapshot.orders.is_empty());
        assert_eq!(snapshot.origin, SnapshotOrigin::Remote);
        assert_eq!(snapshot.last_updated, clock.now());
        assert!(!engine.is_syncing());
    }

    #[tokio::test]
    async fn failure_stores_fallback_and_clears_flag() {
        let (engine, _) = engine(true, Duration::ZERO);
        let outcome = engine.sync("nevetal", false).await;
        assert_eq!(outcome.snapshot().unwrap().orders.len(), 6);
        assert!(engine.cached("nevetal").unwrap().snapshot.is_fallback());
        assert!(!engine.is_syncing());
    }

    #[tokio::test]
    async fn reuses_within_ttl_then_refetches() {
        let (engine, clock) = engine(false, Duration::from_secs(30));
        assert!(matches!(engine.sync("a", false).await, SyncOutcome::Synced(_)));
        clock.advance(chrono::Duration::seconds(10));
        assert!(matches!(engine.sync("a", false).await, SyncOutcome::Reused(_)));
        assert!(matches!(engine.sync("a", true).await, SyncOutcome::Synced(_)));
        clock.advance(chrono::Duration::seconds(30));
        assert!(matches!(engine.sync("a", false).await, SyncOutcome::Synced(_)));
    }

    #[tokio::test]
    async fn select_drops_other_accounts() {
        let (engine, _) = engine(false, Duration::ZERO);
        engine.sync("a", false).await;
        engine.sync("b", false).await;
        engine.select(Some("b"));
        assert!(engine.cached("a").is_none());
        assert!(engine.cached("b").is_some());
        engine.select(None);
        assert!(engine.cached("b").is_none());
    }

    #[tokio::test]
    async fn sync_for_unselected_account_is_not_cached() {
        let (engine, _) = engine(false, Duration::ZERO);
        engine.select(Some("b"));

        let outcome = engine.sync("a", true).await;

        assert!(matches!(&outcome, SyncOutcome::Stale { account } if account == "a"));
        assert!(engine.cached("a").is_none());
        assert!(matches!(engine.sync("b", false).await, SyncOutcome::Synced(_)));

        engine.select(None);
        assert!(matches!(engine.sync("b", false).await, SyncOutcome::Stale { .. }));
        assert!(engine.cached("b").is_none());
    }
}
