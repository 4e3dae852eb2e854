//! In-memory attendee store for fast, deterministic tests.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on a poisoned lock

use async_trait::async_trait;
use pass_in_core::{Attendee, AttendeeChanges, AttendeeId, AttendeeStore, EventId, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// HashMap-backed [`AttendeeStore`] that counts reads and writes.
///
/// Cloning shares the underlying records and counters, so a test can keep a
/// handle while the router owns another.
///
/// # Example
///
/// ```
/// use pass_in_testing::{InMemoryAttendeeStore, fixtures};
///
/// let store = InMemoryAttendeeStore::with_attendees([fixtures::ana()]);
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.reads(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryAttendeeStore {
    records: Arc<RwLock<HashMap<AttendeeId, Attendee>>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    failure: Arc<RwLock<Option<String>>>,
}

impl InMemoryAttendeeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `attendees`, keyed by their `id`.
    #[must_use]
    pub fn with_attendees(attendees: impl IntoIterator<Item = Attendee>) -> Self {
        let store = Self::new();
        for attendee in attendees {
            store.insert(attendee);
        }
        store
    }

    /// Insert or replace a record without counting it as a write.
    pub fn insert(&self, attendee: Attendee) {
        self.records.write().unwrap().insert(attendee.id, attendee);
    }

    /// Remove a record, as a concurrent deletion would.
    pub fn remove(&self, id: AttendeeId) -> Option<Attendee> {
        self.records.write().unwrap().remove(&id)
    }

    /// Current stored value of a record.
    #[must_use]
    pub fn get(&self, id: AttendeeId) -> Option<Attendee> {
        self.records.read().unwrap().get(&id).cloned()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    /// Number of `find_by_event_and_id` calls so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `update_by_id` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with `StoreError::Database(message)`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().unwrap() = Some(message.into());
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.read().unwrap().as_ref() {
            Some(message) => Err(StoreError::Database(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AttendeeStore for InMemoryAttendeeStore {
    async fn find_by_event_and_id(
        &self,
        event_id: EventId,
        id: AttendeeId,
    ) -> Result<Option<Attendee>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        Ok(self
            .records
            .read()
            .unwrap()
            .get(&id)
            .filter(|attendee| attendee.event_id == event_id)
            .cloned())
    }

    async fn update_by_id(
        &self,
        id: AttendeeId,
        changes: &AttendeeChanges,
    ) -> Result<Attendee, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let mut records = self.records.write().unwrap();
        let current = records.get(&id).ok_or(StoreError::NotFound(id))?;
        let updated = current.with_changes(changes);
        records.insert(id, updated.clone());
        Ok(updated)
    }
}
