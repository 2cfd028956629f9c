//! Level derivation from accumulated experience.

use crate::config::XpPerLevel;

/// `floor(experience / xp_per_level)`. Total, since the divisor is non-zero.
#[must_use]
pub fn level(experience: u64, xp_per_level: XpPerLevel) -> u64 {
    experience / xp_per_level.get()
}
