//! Runtime counters for the PETZ pet system.
//!
//! Lock-free `AtomicU64` counters bumped on every operation outcome, with a
//! Prometheus text export for server dashboards.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters for operation outcomes.
pub struct PetzCounters {
    /// Pets created.
    pub pets_created: AtomicU64,
    /// Successful feedings.
    pub feeds: AtomicU64,
    /// Successful training sessions.
    pub trains: AtomicU64,
    /// Read-only projections served.
    pub queries: AtomicU64,
    /// Decay intervals settled into stored records.
    pub intervals_settled: AtomicU64,
    /// Calls rejected because the caller was not the owner.
    pub rejected_unauthorized: AtomicU64,
    /// Training attempts rejected at zero hunger.
    pub rejected_too_hungry: AtomicU64,
    /// Creations rejected while minting was disabled.
    pub rejected_creation_disabled: AtomicU64,
}

impl PetzCounters {
    /// Create a new set of zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pets_created: AtomicU64::new(0),
            feeds: AtomicU64::new(0),
            trains: AtomicU64::new(0),
            queries: AtomicU64::new(0),
            intervals_settled: AtomicU64::new(0),
            rejected_unauthorized: AtomicU64::new(0),
            rejected_too_hungry: AtomicU64::new(0),
            rejected_creation_disabled: AtomicU64::new(0),
        }
    }

    /// Bump a counter by one.
    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot all counters for export.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            pets_created: self.pets_created.load(Ordering::Relaxed),
            feeds: self.feeds.load(Ordering::Relaxed),
            trains: self.trains.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
            intervals_settled: self.intervals_settled.load(Ordering::Relaxed),
            rejected: [
                self.rejected_unauthorized.load(Ordering::Relaxed),
                self.rejected_too_hungry.load(Ordering::Relaxed),
                self.rejected_creation_disabled.load(Ordering::Relaxed),
            ],
        }
    }
}

impl Default for PetzCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PetzCounters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.snapshot(), f)
    }
}

/// A snapshot of counter values at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Pets created.
    pub pets_created: u64,
    /// Successful feedings.
    pub feeds: u64,
    /// Successful training sessions.
    pub trains: u64,
    /// Read-only projections served.
    pub queries: u64,
    /// Decay intervals settled into stored records.
    pub intervals_settled: u64,
    /// Rejections by reason [unauthorized, `too_hungry`, `creation_disabled`].
    pub rejected: [u64; 3],
}

impl CounterSnapshot {
    /// Format as Prometheus-compatible text.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        format!(
            "# HELP petz_pets_created_total Pets created\n\
             # TYPE petz_pets_created_total counter\n\
             petz_pets_created_total {}\n\
             # HELP petz_feeds_total Successful feedings\n\
             # TYPE petz_feeds_total counter\n\
             petz_feeds_total {}\n\
             # HELP petz_trains_total Successful training sessions\n\
             # TYPE petz_trains_total counter\n\
             petz_trains_total {}\n\
             # HELP petz_queries_total Read-only stat projections\n\
             # TYPE petz_queries_total counter\n\
             petz_queries_total {}\n\
             # HELP petz_intervals_settled_total Decay intervals committed\n\
             # TYPE petz_intervals_settled_total counter\n\
             petz_intervals_settled_total {}\n\
             # HELP petz_rejected_total Rejected operations by reason\n\
             # TYPE petz_rejected_total counter\n\
             petz_rejected_total{{reason=\"unauthorized\"}} {}\n\
             petz_rejected_total{{reason=\"too_hungry\"}} {}\n\
             petz_rejected_total{{reason=\"creation_disabled\"}} {}\n",
            self.pets_created,
            self.feeds,
            self.trains,
            self.queries,
            self.intervals_settled,
            self.rejected[0],
            self.rejected[1],
            self.rejected[2],
        )
    }
}

/// Span names opened by `PetController` around each operation.
pub mod spans {
    /// Pet creation.
    pub const CREATE: &str = "petz::create";
    /// Feeding.
    pub const FEED: &str = "petz::feed";
    /// Training.
    pub const TRAIN: &str = "petz::train";
    /// Read-only stat projection.
    pub const QUERY: &str = "petz::query";
}
