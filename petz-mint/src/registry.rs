//! Token registry: who owns which pet.
//!
//! Ids are handed out sequentially from zero. Each token carries its owner
//! and an opaque metadata URI. Transfers and burning are not modelled; the
//! registry only answers ownership questions for the core.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use petz_core::error::{PetzError, Result};
use petz_core::interaction::OwnershipOracle;
use petz_core::types::{OwnerId, PetId};
use serde::{Deserialize, Serialize};

/// One minted token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    /// Current owner.
    pub owner: OwnerId,
    /// Metadata location (image, name, traits), opaque to the game.
    pub metadata_uri: String,
}

/// In-memory ownership ledger.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: RwLock<HashMap<PetId, TokenEntry>>,
    next_id: AtomicU64,
}

impl TokenRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next token id.
    pub fn allocate_id(&self) -> PetId {
        PetId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Record `owner` and `metadata_uri` for `id`.
    ///
    /// # Errors
    /// Returns `PetzError::AlreadyExists` if `id` is already registered.
    pub fn register(
        &self,
        id: PetId,
        owner: OwnerId,
        metadata_uri: impl Into<String>,
    ) -> Result<()> {
        let mut tokens = self.tokens.write();
        if tokens.contains_key(&id) {
            return Err(PetzError::AlreadyExists(id));
        }
        tokens.insert(
            id,
            TokenEntry {
                owner,
                metadata_uri: metadata_uri.into(),
            },
        );
        Ok(())
    }

    /// Drop a registration. Used to roll back a half-finished mint.
    pub(crate) fn unregister(&self, id: PetId) {
        self.tokens.write().remove(&id);
    }

    /// Owner of `id`.
    ///
    /// # Errors
    /// Returns `PetzError::NotFound` for an unminted id.
    pub fn owner_of(&self, id: PetId) -> Result<OwnerId> {
        self.tokens
            .read()
            .get(&id)
            .map(|t| t.owner)
            .ok_or(PetzError::NotFound(id))
    }

    /// Metadata URI of `id`.
    ///
    /// # Errors
    /// Returns `PetzError::NotFound` for an unminted id.
    pub fn token_uri(&self, id: PetId) -> Result<String> {
        self.tokens
            .read()
            .get(&id)
            .map(|t| t.metadata_uri.clone())
            .ok_or(PetzError::NotFound(id))
    }

    /// Number of tokens held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: OwnerId) -> usize {
        self.tokens
            .read()
            .values()
            .filter(|t| t.owner == owner)
            .count()
    }

    /// Number of minted tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.read().len()
    }

    /// Whether nothing has been minted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.read().is_empty()
    }
}

impl OwnershipOracle for TokenRegistry {
    fn is_owner(&self, pet: PetId, caller: OwnerId) -> bool {
        self.tokens
            .read()
            .get(&pet)
            .is_some_and(|t| t.owner == caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_from_zero() {
        let reg = TokenRegistry::new();
        assert_eq!(reg.allocate_id(), PetId(0));
        assert_eq!(reg.allocate_id(), PetId(1));
    }

    #[test]
    fn register_and_look_up() {
        let reg = TokenRegistry::new();
        let alice = OwnerId::new();
        reg.register(PetId(0), alice, "ipfs://pet/0").expect("fresh id");
        assert_eq!(reg.owner_of(PetId(0)).expect("minted"), alice);
        assert_eq!(reg.token_uri(PetId(0)).expect("minted"), "ipfs://pet/0");
        assert_eq!(reg.balance_of(alice), 1);
        assert!(reg.is_owner(PetId(0), alice));
        assert!(!reg.is_owner(PetId(0), OwnerId::new()));
    }

    #[test]
    fn unknown_token_has_no_owner() {
        let reg = TokenRegistry::new();
        assert!(!reg.is_owner(PetId(4), OwnerId::new()));
        assert!(matches!(reg.owner_of(PetId(4)), Err(PetzError::NotFound(_))));
        assert!(reg.is_empty());
    }

    #[test]
    fn double_register_rejected() {
        let reg = TokenRegistry::new();
        reg.register(PetId(0), OwnerId::new(), "a").expect("fresh id");
        assert!(matches!(
            reg.register(PetId(0), OwnerId::new(), "b"),
            Err(PetzError::AlreadyExists(_))
        ));
        assert_eq!(reg.token_uri(PetId(0)).expect("minted"), "a");
        reg.unregister(PetId(0));
        assert_eq!(reg.len(), 0);
    }
}
