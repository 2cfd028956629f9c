//! Property-Based Tests for PETZ Core
//!
//! Uses `proptest` to verify decay and level invariants under random inputs.
//! The decay engine is pure, so every property here must hold for any
//! starting stats, any baseline and any evaluation instant.

use std::sync::Arc;

use proptest::prelude::*;

use petz_core::config::{AdminSettings, StatRules, XpPerLevel};
use petz_core::decay::{compute_decay, project};
use petz_core::events::NullSink;
use petz_core::interaction::{OwnershipOracle, PetController};
use petz_core::level::level;
use petz_core::types::{OwnerId, PetId, PetRecord, Timestamp};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_rules() -> impl Strategy<Value = StatRules> {
    (1..=1_000u32, 1..=86_400u64, 0..=20u32, 0..=200u32)
        .prop_map(|(max_stat, interval, rate, replenish)| StatRules {
            max_stat,
            decay_interval_secs: interval,
            decay_rate: rate,
            feed_replenish: replenish,
            ..StatRules::default()
        })
}

fn arb_record(max_stat: u32) -> impl Strategy<Value = PetRecord> {
    (0..=max_stat, 0..=max_stat, 0..=1_000_000_000u64, 0..=10_000u64).prop_map(
        |(hunger, happiness, last, experience)| PetRecord {
            experience,
            hunger,
            happiness,
            last_interaction: Timestamp(last),
        },
    )
}

fn rules_and_record() -> impl Strategy<Value = (StatRules, PetRecord)> {
    arb_rules().prop_flat_map(|rules| (Just(rules), arb_record(rules.max_stat)))
}

struct Anyone;

impl OwnershipOracle for Anyone {
    fn is_owner(&self, _pet: PetId, _caller: OwnerId) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Property: decay at a fixed instant is idempotent
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn settling_twice_at_same_instant_is_noop(
        (rules, rec) in rules_and_record(),
        ahead in 0..10_000_000u64,
    ) {
        let now = rec.last_interaction.plus_secs(ahead);
        let once = project(&rec, now, &rules);
        let twice = project(&once, now, &rules);
        prop_assert_eq!(once, twice);
    }
}

// ---------------------------------------------------------------------------
// Property: stats never increase as time moves forward
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn decay_is_monotone_in_time(
        (rules, rec) in rules_and_record(),
        a in 0..10_000_000u64,
        b in 0..10_000_000u64,
    ) {
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let start = rec.last_interaction;
        let d1 = compute_decay(rec.hunger, rec.happiness, start, start.plus_secs(early), &rules);
        let d2 = compute_decay(rec.hunger, rec.happiness, start, start.plus_secs(late), &rules);
        prop_assert!(d2.hunger <= d1.hunger);
        prop_assert!(d2.happiness <= d1.happiness);
        prop_assert!(d1.hunger <= rec.hunger);
    }
}

// ---------------------------------------------------------------------------
// Property: the baseline only moves forward, in whole intervals, never past now
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn baseline_advances_in_whole_intervals(
        (rules, rec) in rules_and_record(),
        now in 0..2_000_000_000u64,
    ) {
        let now = Timestamp(now);
        let d = compute_decay(rec.hunger, rec.happiness, rec.last_interaction, now, &rules);
        prop_assert!(d.last_interaction >= rec.last_interaction);
        let advanced = d.last_interaction.as_secs() - rec.last_interaction.as_secs();
        prop_assert_eq!(advanced % rules.decay_interval_secs, 0);
        prop_assert_eq!(advanced / rules.decay_interval_secs, d.intervals);
        if now >= rec.last_interaction {
            prop_assert!(d.last_interaction <= now);
            prop_assert!(now.saturating_since(d.last_interaction) < rules.decay_interval_secs);
        } else {
            prop_assert!(d.is_noop());
        }
    }
}

// ---------------------------------------------------------------------------
// Property: splitting the elapsed time never changes the outcome
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn decay_composes_across_split_points(
        (rules, rec) in rules_and_record(),
        first in 0..5_000_000u64,
        second in 0..5_000_000u64,
    ) {
        let mid = rec.last_interaction.plus_secs(first);
        let end = mid.plus_secs(second);
        let stepwise = project(&project(&rec, mid, &rules), end, &rules);
        let direct = project(&rec, end, &rules);
        prop_assert_eq!(stepwise, direct);
    }
}

// ---------------------------------------------------------------------------
// Property: feeding keeps hunger within bounds and reports the true delta
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn feed_stays_in_bounds_and_delta_is_exact(
        (rules, rec) in rules_and_record(),
        ahead in 0..10_000_000u64,
    ) {
        let ctl = PetController::new(rules, Arc::new(AdminSettings::default()), Anyone, NullSink)
            .expect("generated rules are valid");
        let pet = PetId(0);
        ctl.create(pet, Timestamp(0)).expect("fresh id");
        ctl.store().commit(pet, rec).expect("exists");

        let now = rec.last_interaction.plus_secs(ahead);
        let before = ctl.query(pet, now).expect("exists");
        let out = ctl.feed(pet, OwnerId::new(), now).expect("anyone may feed");

        prop_assert!(out.record.hunger <= rules.max_stat);
        prop_assert!(out.record.happiness <= rules.max_stat);
        prop_assert!(out.applied_delta <= rules.feed_replenish);
        prop_assert_eq!(out.record.hunger, before.hunger + out.applied_delta);
        prop_assert_eq!(out.record.experience, rec.experience);
    }
}

// ---------------------------------------------------------------------------
// Property: training never lowers experience nor pushes happiness below zero
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn training_only_adds_experience(
        (rules, rec) in rules_and_record(),
        ahead in 0..1_000_000u64,
    ) {
        let ctl = PetController::new(rules, Arc::new(AdminSettings::default()), Anyone, NullSink)
            .expect("generated rules are valid");
        let pet = PetId(1);
        ctl.create(pet, Timestamp(0)).expect("fresh id");
        ctl.store().commit(pet, rec).expect("exists");

        let now = rec.last_interaction.plus_secs(ahead);
        match ctl.train(pet, OwnerId::new(), now) {
            Ok(out) => {
                prop_assert_eq!(out.record.experience, rec.experience + rules.train_xp_gain);
                prop_assert!(out.record.hunger > 0);
                prop_assert!(out.record.happiness <= rec.happiness);
            }
            Err(_) => {
                prop_assert_eq!(ctl.store().get(pet).expect("exists"), rec);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property: level is floor division and monotone in experience
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn level_is_floor_division(xp in 0..u64::MAX / 2, per in 1..10_000u64) {
        let per_level = XpPerLevel::new(per).expect("non-zero");
        let lvl = level(xp, per_level);
        prop_assert!(lvl * per <= xp);
        prop_assert!(xp < (lvl + 1) * per);
        prop_assert!(level(xp + 1, per_level) >= lvl);
    }
}
