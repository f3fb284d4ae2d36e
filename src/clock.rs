//! Time and randomness sources.
//!
//! The sync engine and notification deriver never call `Utc::now()` or
//! `thread_rng()` directly; they go through a [`Clock`] and a seedable
//! [`StdRng`] so tests can pin both.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant, advanced manually.
#[derive(Debug)]
pub struct FixedClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Returns an RNG seeded from OS entropy.
#[must_use]
pub fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Returns a deterministic RNG for reproducible output.
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
