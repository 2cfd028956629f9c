//! Interval Decay: lazy stat settlement.
//!
//! Pets lose `decay_rate` points of hunger and happiness for every full
//! `decay_interval_secs` that passes without being settled:
//!
//!   intervals = floor((now - last_interaction) / interval)
//!   stat'     = max(stat - intervals × rate, 0)
//!   last'     = last_interaction + intervals × interval
//!
//! `last'` is deliberately not `now`. The unfinished tail of the current
//! interval stays unsettled so that it counts toward the next one; settling
//! twice at the same instant is a no-op.
//!
//! A clock that runs backwards (`now < last_interaction`) settles zero
//! intervals.

use tracing::trace;

use crate::config::StatRules;
use crate::types::{PetRecord, Timestamp};

/// Result of settling decay up to some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decay {
    /// Hunger after decay.
    pub hunger: u32,
    /// Happiness after decay.
    pub happiness: u32,
    /// New settlement point, advanced by whole intervals only.
    pub last_interaction: Timestamp,
    /// Number of full intervals consumed.
    pub intervals: u64,
}

impl Decay {
    /// True when no full interval elapsed, i.e. nothing changed.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.intervals == 0
    }
}

/// Compute decayed stats for a `(hunger, happiness)` pair last settled at
/// `last_interaction`, evaluated at `now`.
///
/// Pure and deterministic; safe for both read-only projection and as the
/// first step of a mutation.
#[must_use]
pub fn compute_decay(
    hunger: u32,
    happiness: u32,
    last_interaction: Timestamp,
    now: Timestamp,
    rules: &StatRules,
) -> Decay {
    if now < last_interaction {
        trace!(%last_interaction, %now, "Clock regression, settling zero intervals");
    }

    let elapsed = now.saturating_since(last_interaction);
    let interval = rules.decay_interval_secs.max(1);
    let intervals = elapsed / interval;

    if intervals == 0 {
        return Decay {
            hunger,
            happiness,
            last_interaction,
            intervals,
        };
    }

    let total = u32::try_from(intervals.saturating_mul(u64::from(rules.decay_rate)))
        .unwrap_or(u32::MAX);

    Decay {
        hunger: hunger.saturating_sub(total),
        happiness: happiness.saturating_sub(total),
        // intervals × interval <= elapsed, so this cannot overflow.
        last_interaction: last_interaction.plus_secs(intervals * interval),
        intervals,
    }
}

/// Settle a stored record's decay at `now`.
#[must_use]
pub fn settle(record: &PetRecord, now: Timestamp, rules: &StatRules) -> Decay {
    compute_decay(
        record.hunger,
        record.happiness,
        record.last_interaction,
        now,
        rules,
    )
}

/// The record as it would look with decay settled at `now`.
#[must_use]
pub fn project(record: &PetRecord, now: Timestamp, rules: &StatRules) -> PetRecord {
    let decay = settle(record, now, rules);
    PetRecord {
        experience: record.experience,
        hunger: decay.hunger,
        happiness: decay.happiness,
        last_interaction: decay.last_interaction,
    }
}
