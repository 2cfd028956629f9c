//! # PETZ Core Library
//!
//! Game-agnostic state machine for collectible digital pets.
//!
//! Every pet has a [`PetRecord`] holding three stats that evolve over time:
//!
//! - **Experience**: grows only through training, never shrinks
//! - **Hunger**: drains with time, refilled by feeding
//! - **Happiness**: drains with time and with every training session
//!
//! Decay is settled lazily: nothing ticks in the background. Every read or
//! write asks the [`decay`] engine what the stats look like "now", and only
//! mutating actions commit the result.
//!
//! Ownership, minting policy and the wall clock are supplied from outside
//! (see the `petz-mint` crate for a reference collaborator layer).

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod decay;
pub mod error;
pub mod events;
pub mod interaction;
pub mod level;
pub mod metrics;
pub mod store;
pub mod types;

pub use config::{AdminConfig, AdminSettings, PetzConfig, StatRules, XpPerLevel};
pub use error::PetzError;
pub use events::{EventLog, EventSink, FnSink, NullSink, PetEvent};
pub use interaction::{FeedOutcome, OwnershipOracle, PetController, TrainOutcome};
pub use store::PetStore;
pub use types::*;
