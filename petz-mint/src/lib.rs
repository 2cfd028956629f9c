//! # petz-mint: Collectible Token Integration for PETZ
//!
//! This crate provides the collaborator layer the game-agnostic `petz-core`
//! state machine relies on but does not implement itself.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              PetService                  │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │ TokenRegistry │  │  Clock          │  │
//! │  │ (ownership)   │  │  (now)          │  │
//! │  └──────┬───────┘  └────────┬────────┘  │
//! │         │  is_owner          │ now       │
//! │         ▼                    ▼           │
//! │    ┌─────────────────────────────────┐   │
//! │    │  petz-core PetController        │   │
//! │    └─────────────────────────────────┘   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `clock`: wall clock and manual clock
//! - `registry`: token ownership and metadata URIs
//! - `service`: mint gate, admin setters, clock-driven pet actions
//! - `telemetry`: tracing subscriber setup

pub mod clock;
pub mod registry;
pub mod service;
pub mod telemetry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use registry::{TokenEntry, TokenRegistry};
pub use service::PetService;
