//! Clock-driven facade over the core controller.
//!
//! `PetService` wires a [`TokenRegistry`] in as the ownership oracle, asks
//! its [`Clock`] for "now" before every call, and owns the mint gate and the
//! admin setters.

use std::sync::Arc;

use petz_core::config::PetzConfig;
use petz_core::error::{PetzError, Result};
use petz_core::events::EventSink;
use petz_core::interaction::{FeedOutcome, PetController, TrainOutcome};
use petz_core::metrics::PetzCounters;
use petz_core::types::{OwnerId, PetId, PetStatus};
use petz_core::AdminSettings;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::registry::TokenRegistry;

/// Mint, feed, train and inspect pets against a live clock.
pub struct PetService<C, E> {
    controller: PetController<Arc<TokenRegistry>, E>,
    registry: Arc<TokenRegistry>,
    clock: C,
}

impl<C: Clock, E: EventSink> PetService<C, E> {
    /// Build a service with an empty registry.
    ///
    /// # Errors
    /// Returns `PetzError::Config` if `config` fails validation.
    pub fn new(config: &PetzConfig, clock: C, sink: E) -> Result<Self> {
        config.validate()?;
        let admin = Arc::new(AdminSettings::new(&config.admin)?);
        let registry = Arc::new(TokenRegistry::new());
        let controller = PetController::new(config.rules, admin, Arc::clone(&registry), sink)?;
        Ok(Self {
            controller,
            registry,
            clock,
        })
    }

    /// Mint a new pet for `owner`.
    ///
    /// # Errors
    /// Returns `PetzError::CreationDisabled` while minting is switched off.
    pub fn mint(&self, owner: OwnerId, metadata_uri: impl Into<String>) -> Result<PetId> {
        if !self.controller.admin().minting_allowed() {
            PetzCounters::incr(&self.controller.counters().rejected_creation_disabled);
            warn!(%owner, "Mint rejected, creation is disabled");
            return Err(PetzError::CreationDisabled);
        }

        let id = self.registry.allocate_id();
        self.registry.register(id, owner, metadata_uri)?;
        if let Err(e) = self.controller.create(id, self.clock.now()) {
            self.registry.unregister(id);
            return Err(e);
        }
        info!(pet = %id, %owner, "Pet minted");
        Ok(id)
    }

    /// Feed `id` on behalf of `caller`.
    ///
    /// # Errors
    /// See [`PetController::feed`].
    pub fn feed(&self, caller: OwnerId, id: PetId) -> Result<FeedOutcome> {
        self.controller.feed(id, caller, self.clock.now())
    }

    /// Train `id` on behalf of `caller`.
    ///
    /// # Errors
    /// See [`PetController::train`].
    pub fn train(&self, caller: OwnerId, id: PetId) -> Result<TrainOutcome> {
        self.controller.train(id, caller, self.clock.now())
    }

    /// Current stats of `id`, decay projected to now.
    ///
    /// # Errors
    /// Returns `PetzError::NotFound` for an unminted id.
    pub fn stats(&self, id: PetId) -> Result<PetStatus> {
        self.controller.status(id, self.clock.now())
    }

    /// Current level of `id`.
    ///
    /// # Errors
    /// Returns `PetzError::NotFound` for an unminted id.
    pub fn level(&self, id: PetId) -> Result<u64> {
        let record = self.controller.store().get(id)?;
        Ok(self.controller.level(record.experience))
    }

    /// Retune experience-per-level. Existing pets keep their experience;
    /// their reported level changes immediately.
    ///
    /// # Errors
    /// Returns `PetzError::Config` if `value` is zero.
    pub fn set_xp_per_level(&self, value: u64) -> Result<()> {
        self.controller.admin().set_xp_per_level(value)?;
        info!(xp_per_level = value, "Experience per level updated");
        Ok(())
    }

    /// Open or close minting.
    pub fn set_minting_allowed(&self, allowed: bool) {
        self.controller.admin().set_minting_allowed(allowed);
        info!(allowed, "Minting toggled");
    }

    /// The wrapped controller.
    #[must_use]
    pub fn controller(&self) -> &PetController<Arc<TokenRegistry>, E> {
        &self.controller
    }

    /// The ownership ledger.
    #[must_use]
    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// The admin parameters shared with the controller.
    #[must_use]
    pub fn admin(&self) -> &AdminSettings {
        self.controller.admin()
    }

    /// The clock used for every call.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
