//! Notifications emitted by successful pet operations.
//!
//! Exactly one event per successful `create`, `feed` or `train`; failed
//! operations emit nothing.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::types::PetId;

/// A state change observers may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PetEvent {
    /// A pet record was created.
    Created {
        /// The new pet.
        id: PetId,
    },
    /// A pet was fed.
    Fed {
        /// The fed pet.
        id: PetId,
        /// Hunger after feeding.
        new_hunger: u32,
        /// Hunger actually gained, after clamping at the stat cap.
        applied_delta: u32,
    },
    /// A pet was trained.
    Trained {
        /// The trained pet.
        id: PetId,
        /// Experience after training.
        new_experience: u64,
        /// Level derived from `new_experience`.
        new_level: u64,
    },
}

impl PetEvent {
    /// The pet this event is about.
    #[must_use]
    pub fn pet(&self) -> PetId {
        match self {
            Self::Created { id } | Self::Fed { id, .. } | Self::Trained { id, .. } => *id,
        }
    }

    /// Serialize to a single JSON line for forwarding.
    ///
    /// # Errors
    /// Returns the underlying `serde_json` error, which cannot happen for
    /// these plain-data variants in practice.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Receiver of [`PetEvent`]s.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    fn emit(&self, event: PetEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: PetEvent) {}
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: Fn(PetEvent) + Send + Sync,
{
    fn emit(&self, event: PetEvent) {
        (self.0)(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn emit(&self, event: PetEvent) {
        (**self).emit(event);
    }
}

/// Collects events in emission order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<PetEvent>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<PetEvent> {
        self.events.lock().clone()
    }

    /// Take everything recorded so far, leaving the log empty.
    pub fn drain(&self) -> Vec<PetEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: PetEvent) {
        self.events.lock().push(event);
    }
}
