//! Core type definitions for the PETZ pet system.
//!
//! All types are plain data, `Copy` where possible and serializable.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Identifier of a pet (the token id of the collectible it is bound to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PetId(pub u64);

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a caller that may own pets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub Uuid);

impl OwnerId {
    /// Create a new random owner ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Wall-clock instant in whole seconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Timestamp from raw seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Raw seconds since the epoch.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, or zero if `earlier` is in the future.
    #[must_use]
    pub const fn saturating_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This timestamp moved forward by `secs`.
    #[must_use]
    pub const fn plus_secs(self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Convert a chrono UTC datetime, clamping pre-epoch values to zero.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(u64::try_from(dt.timestamp()).unwrap_or(0))
    }

    /// Convert to a chrono UTC datetime, if representable.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.0).ok()?;
        Utc.timestamp_opt(secs, 0).single()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
            None => write!(f, "{}s", self.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Pet State
// ---------------------------------------------------------------------------

/// The stored stat record of one pet.
///
/// `last_interaction` is the moment up to which decay has been settled into
/// `hunger` and `happiness`. It only ever moves forward in whole decay
/// intervals, so a partially elapsed interval is carried over to the next
/// settlement instead of being lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRecord {
    /// Accumulated experience. Never decreases.
    pub experience: u64,
    /// Fullness, `0..=max_stat`. Zero means starving.
    pub hunger: u32,
    /// Mood, `0..=max_stat`.
    pub happiness: u32,
    /// Moment decay was last settled.
    pub last_interaction: Timestamp,
}

impl PetRecord {
    /// A freshly hatched pet: no experience, full stats.
    #[must_use]
    pub fn hatch(now: Timestamp, max_stat: u32) -> Self {
        Self {
            experience: 0,
            hunger: max_stat,
            happiness: max_stat,
            last_interaction: now,
        }
    }
}

/// Read-only view of a pet with decay projected to a given instant and the
/// level derived from its experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetStatus {
    /// Which pet.
    pub id: PetId,
    /// Stored experience.
    pub experience: u64,
    /// Level derived from `experience`.
    pub level: u64,
    /// Hunger after projected decay.
    pub hunger: u32,
    /// Happiness after projected decay.
    pub happiness: u32,
    /// The stored settlement time (not advanced by projection).
    pub last_interaction: Timestamp,
}
