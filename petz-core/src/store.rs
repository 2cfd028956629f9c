//! In-memory keyed store of pet records.
//!
//! The store is the single owner of every [`PetRecord`]. Callers get copies
//! out of [`PetStore::get`] and hand whole records back through
//! [`PetStore::commit`]; fields are never patched individually.
//!
//! Backed by a `DashMap`, so operations on different pets proceed in
//! parallel while [`PetStore::update`] holds the entry lock of a single pet
//! for the whole read-modify-write, making transitions on one pet
//! linearizable.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::{PetzError, Result};
use crate::types::{PetId, PetRecord, Timestamp};

/// Keyed mapping from pet ID to its stat record.
#[derive(Debug, Default)]
pub struct PetStore {
    records: DashMap<PetId, PetRecord>,
}

impl PetStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Create with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: DashMap::with_capacity(capacity),
        }
    }

    /// Insert a freshly hatched record for `id`.
    ///
    /// # Errors
    /// Returns `PetzError::AlreadyExists` if `id` is taken.
    pub fn create(&self, id: PetId, now: Timestamp, max_stat: u32) -> Result<PetRecord> {
        match self.records.entry(id) {
            Entry::Occupied(_) => Err(PetzError::AlreadyExists(id)),
            Entry::Vacant(slot) => {
                let record = PetRecord::hatch(now, max_stat);
                slot.insert(record);
                Ok(record)
            }
        }
    }

    /// Copy of the stored record.
    ///
    /// # Errors
    /// Returns `PetzError::NotFound` if `id` was never created.
    pub fn get(&self, id: PetId) -> Result<PetRecord> {
        self.records
            .get(&id)
            .map(|r| *r.value())
            .ok_or(PetzError::NotFound(id))
    }

    /// Replace the stored record wholesale.
    ///
    /// # Errors
    /// Returns `PetzError::NotFound` if `id` was never created.
    pub fn commit(&self, id: PetId, record: PetRecord) -> Result<()> {
        let mut slot = self.records.get_mut(&id).ok_or(PetzError::NotFound(id))?;
        *slot = record;
        Ok(())
    }

    /// Atomic read-modify-write of one record.
    ///
    /// `transition` sees the current record and either returns the record to
    /// store plus a value for the caller, or an error, in which case the
    /// stored record is left untouched. The pet's entry stays locked for the
    /// duration, so `transition` must not call back into the store.
    ///
    /// # Errors
    /// Returns `PetzError::NotFound` for an unknown `id`, or whatever
    /// `transition` returns.
    pub fn update<T, F>(&self, id: PetId, transition: F) -> Result<T>
    where
        F: FnOnce(&PetRecord) -> Result<(PetRecord, T)>,
    {
        self.update_then(id, transition, |_| ())
    }

    /// [`update`](Self::update), then run `on_commit` on the caller's value
    /// after the new record is written but before the entry lock is
    /// released.
    ///
    /// Commits on one pet are serialized, so `on_commit` observes them in
    /// commit order. Like `transition`, it must not call back into the store.
    ///
    /// # Errors
    /// Returns `PetzError::NotFound` for an unknown `id`, or whatever
    /// `transition` returns. `on_commit` does not run on error.
    pub fn update_then<T, F, G>(&self, id: PetId, transition: F, on_commit: G) -> Result<T>
    where
        F: FnOnce(&PetRecord) -> Result<(PetRecord, T)>,
        G: FnOnce(&T),
    {
        let mut slot = self.records.get_mut(&id).ok_or(PetzError::NotFound(id))?;
        let (next, out) = transition(slot.value())?;
        *slot = next;
        on_commit(&out);
        Ok(out)
    }

    /// Whether `id` has been created.
    #[must_use]
    pub fn contains(&self, id: PetId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of pets in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
