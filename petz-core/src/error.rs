//! Error types for the PETZ core library.

use thiserror::Error;

use crate::types::{OwnerId, PetId};

/// Top-level error type for all PETZ operations.
///
/// Every variant is recoverable. A failed operation never leaves a partial
/// write behind and never emits an event.
#[derive(Error, Debug)]
pub enum PetzError {
    /// No pet with the given ID has been created.
    #[error("Pet not found: {0}")]
    NotFound(PetId),

    /// A pet with the given ID already exists.
    #[error("Pet already exists: {0}")]
    AlreadyExists(PetId),

    /// The caller does not own the pet it tried to act on.
    #[error("Caller {caller} is not the owner of pet {pet}")]
    Unauthorized {
        /// The pet the caller tried to act on.
        pet: PetId,
        /// The identity that made the call.
        caller: OwnerId,
    },

    /// Training was attempted while the pet's hunger had decayed to zero.
    #[error("Pet {0} is too hungry to train")]
    TooHungry(PetId),

    /// Creation was attempted while minting is switched off.
    #[error("Pet creation is currently disabled")]
    CreationDisabled,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, PetzError>;
