//! Interaction Controller: feed, train and query.
//!
//! Every operation settles decay first, relative to the caller-supplied
//! `now`. Mutating operations then commit decay plus their own effect in a
//! single [`PetStore::update_then`], so a pet is either fully transitioned
//! (and an event emitted) or left exactly as it was. Events are emitted
//! while the pet is still locked, so they reach the sink in commit order;
//! sinks must not call back into the controller.
//!
//! Each operation runs inside a `debug` span named from [`spans`].
//!
//! | Operation | Owner only | Commits | Event     |
//! |-----------|------------|---------|-----------|
//! | `create`  | no         | yes     | `Created` |
//! | `feed`    | yes        | yes     | `Fed`     |
//! | `train`   | yes        | yes     | `Trained` |
//! | `query`   | no         | no      | none      |

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tracing::{debug, debug_span, warn};

use crate::config::{AdminSettings, StatRules};
use crate::decay;
use crate::error::{PetzError, Result};
use crate::events::{EventSink, PetEvent};
use crate::level;
use crate::metrics::{PetzCounters, spans};
use crate::store::PetStore;
use crate::types::{OwnerId, PetId, PetRecord, PetStatus, Timestamp};

/// Answers "does `caller` currently own `pet`?".
///
/// Token ownership lives outside the core; implementors typically wrap a
/// token registry.
pub trait OwnershipOracle: Send + Sync {
    /// Whether `caller` owns `pet`. Unknown pets are owned by nobody.
    fn is_owner(&self, pet: PetId, caller: OwnerId) -> bool;
}

impl<T: OwnershipOracle + ?Sized> OwnershipOracle for Arc<T> {
    fn is_owner(&self, pet: PetId, caller: OwnerId) -> bool {
        (**self).is_owner(pet, caller)
    }
}

/// What a successful feeding committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOutcome {
    /// The committed record.
    pub record: PetRecord,
    /// Hunger actually gained, after clamping at the stat cap.
    pub applied_delta: u32,
}

/// What a successful training session committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainOutcome {
    /// The committed record.
    pub record: PetRecord,
    /// Level derived from the new experience.
    pub level: u64,
}

/// Applies owner-triggered actions to pets held in a [`PetStore`].
pub struct PetController<O, E> {
    store: PetStore,
    rules: StatRules,
    admin: Arc<AdminSettings>,
    oracle: O,
    sink: E,
    counters: PetzCounters,
}

impl<O: OwnershipOracle, E: EventSink> PetController<O, E> {
    /// Build a controller over an empty store.
    ///
    /// # Errors
    /// Returns `PetzError::Config` if `rules` fail validation.
    pub fn new(rules: StatRules, admin: Arc<AdminSettings>, oracle: O, sink: E) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            store: PetStore::new(),
            rules,
            admin,
            oracle,
            sink,
            counters: PetzCounters::new(),
        })
    }

    /// Hatch a new pet at `now`.
    ///
    /// Whether creation is allowed at all is decided by the caller's mint
    /// gate; the core only refuses duplicates.
    ///
    /// # Errors
    /// Returns `PetzError::AlreadyExists` if `id` is taken.
    pub fn create(&self, id: PetId, now: Timestamp) -> Result<PetRecord> {
        let _span = debug_span!(spans::CREATE, pet = %id).entered();
        let record = self.store.create(id, now, self.rules.max_stat)?;
        PetzCounters::incr(&self.counters.pets_created);
        debug!(pet = %id, %now, "Pet created");
        self.sink.emit(PetEvent::Created { id });
        Ok(record)
    }

    /// Settle decay and refill hunger by `feed_replenish`, capped at
    /// `max_stat`.
    ///
    /// # Errors
    /// `Unauthorized` if `caller` does not own the pet, `NotFound` if the
    /// pet does not exist.
    pub fn feed(&self, id: PetId, caller: OwnerId, now: Timestamp) -> Result<FeedOutcome> {
        let _span = debug_span!(spans::FEED, pet = %id).entered();
        self.authorize(id, caller)?;
        let rules = self.rules;

        let (outcome, _) = self.store.update_then(
            id,
            |record| {
                let decayed = decay::settle(record, now, &rules);
                let hunger = decayed
                    .hunger
                    .saturating_add(rules.feed_replenish)
                    .min(rules.max_stat);
                let next = PetRecord {
                    experience: record.experience,
                    hunger,
                    happiness: decayed.happiness,
                    last_interaction: decayed.last_interaction,
                };
                let outcome = FeedOutcome {
                    record: next,
                    applied_delta: hunger.saturating_sub(decayed.hunger),
                };
                Ok((next, (outcome, decayed.intervals)))
            },
            |&(outcome, intervals)| {
                self.counters
                    .intervals_settled
                    .fetch_add(intervals, Ordering::Relaxed);
                PetzCounters::incr(&self.counters.feeds);
                debug!(
                    hunger = outcome.record.hunger,
                    delta = outcome.applied_delta,
                    intervals,
                    "Pet fed"
                );
                self.sink.emit(PetEvent::Fed {
                    id,
                    new_hunger: outcome.record.hunger,
                    applied_delta: outcome.applied_delta,
                });
            },
        )?;
        Ok(outcome)
    }

    /// Settle decay, then trade `train_happiness_cost` happiness for
    /// `train_xp_gain` experience.
    ///
    /// A pet whose hunger has decayed to zero refuses to train; in that case
    /// nothing is committed, not even the decay computed along the way.
    ///
    /// # Errors
    /// `Unauthorized` if `caller` does not own the pet, `NotFound` if the
    /// pet does not exist, `TooHungry` if hunger is zero after decay.
    pub fn train(&self, id: PetId, caller: OwnerId, now: Timestamp) -> Result<TrainOutcome> {
        let _span = debug_span!(spans::TRAIN, pet = %id).entered();
        self.authorize(id, caller)?;
        let rules = self.rules;

        let (outcome, _) = self
            .store
            .update_then(
                id,
                |record| {
                    let decayed = decay::settle(record, now, &rules);
                    if decayed.hunger == 0 {
                        return Err(PetzError::TooHungry(id));
                    }
                    let experience = record.experience.saturating_add(rules.train_xp_gain);
                    let next = PetRecord {
                        experience,
                        hunger: decayed.hunger,
                        happiness: decayed.happiness.saturating_sub(rules.train_happiness_cost),
                        last_interaction: decayed.last_interaction,
                    };
                    // Read under the pet's lock so the reported level matches
                    // the threshold in force at commit time.
                    let outcome = TrainOutcome {
                        record: next,
                        level: level::level(experience, self.admin.xp_per_level()),
                    };
                    Ok((next, (outcome, decayed.intervals)))
                },
                |&(outcome, intervals)| {
                    self.counters
                        .intervals_settled
                        .fetch_add(intervals, Ordering::Relaxed);
                    PetzCounters::incr(&self.counters.trains);
                    debug!(
                        experience = outcome.record.experience,
                        level = outcome.level,
                        happiness = outcome.record.happiness,
                        "Pet trained"
                    );
                    self.sink.emit(PetEvent::Trained {
                        id,
                        new_experience: outcome.record.experience,
                        new_level: outcome.level,
                    });
                },
            )
            .inspect_err(|e| {
                if matches!(e, PetzError::TooHungry(_)) {
                    PetzCounters::incr(&self.counters.rejected_too_hungry);
                    warn!(%now, "Training refused, pet is starving");
                }
            })?;
        Ok(outcome)
    }

    /// Project decay at `now` without committing anything.
    ///
    /// The returned `last_interaction` is the stored one, not the projected
    /// settlement point: two queries at different instants both decay from
    /// the same stored baseline.
    ///
    /// # Errors
    /// Returns `PetzError::NotFound` for an unknown pet.
    pub fn query(&self, id: PetId, now: Timestamp) -> Result<PetRecord> {
        let _span = debug_span!(spans::QUERY, pet = %id).entered();
        let record = self.store.get(id)?;
        let decayed = decay::settle(&record, now, &self.rules);
        PetzCounters::incr(&self.counters.queries);
        Ok(PetRecord {
            experience: record.experience,
            hunger: decayed.hunger,
            happiness: decayed.happiness,
            last_interaction: record.last_interaction,
        })
    }

    /// [`query`](Self::query) plus the derived level.
    ///
    /// # Errors
    /// Returns `PetzError::NotFound` for an unknown pet.
    pub fn status(&self, id: PetId, now: Timestamp) -> Result<PetStatus> {
        let projected = self.query(id, now)?;
        Ok(PetStatus {
            id,
            experience: projected.experience,
            level: self.level(projected.experience),
            hunger: projected.hunger,
            happiness: projected.happiness,
            last_interaction: projected.last_interaction,
        })
    }

    /// Level for `experience` under the current experience-per-level.
    #[must_use]
    pub fn level(&self, experience: u64) -> u64 {
        level::level(experience, self.admin.xp_per_level())
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &PetStore {
        &self.store
    }

    /// The fixed game rules.
    #[must_use]
    pub fn rules(&self) -> &StatRules {
        &self.rules
    }

    /// Shared admin parameters.
    #[must_use]
    pub fn admin(&self) -> &Arc<AdminSettings> {
        &self.admin
    }

    /// Outcome counters.
    #[must_use]
    pub fn counters(&self) -> &PetzCounters {
        &self.counters
    }

    fn authorize(&self, id: PetId, caller: OwnerId) -> Result<()> {
        if self.oracle.is_owner(id, caller) {
            return Ok(());
        }
        PetzCounters::incr(&self.counters.rejected_unauthorized);
        warn!(pet = %id, %caller, "Rejected interaction from non-owner");
        Err(PetzError::Unauthorized { pet: id, caller })
    }
}
