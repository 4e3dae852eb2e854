//! Attendee persistence abstraction.
//!
//! The update use case only needs two operations: a lookup by the composite
//! `(event_id, id)` key and a write by primary key. Implementations live in
//! other crates (`PostgreSQL`, in-memory for tests) and are injected as
//! `Arc<dyn AttendeeStore>`.

use crate::attendee::{Attendee, AttendeeChanges, AttendeeId, EventId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by an [`AttendeeStore`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this primary key exists.
    #[error("Attendee {0} not found")]
    NotFound(AttendeeId),

    /// Database connection, query or constraint failure.
    #[error("Database error: {0}")]
    Database(String),
}

/// Storage for attendee records.
#[async_trait]
pub trait AttendeeStore: Send + Sync {
    /// Find the attendee registered to `event_id` with primary key `id`.
    ///
    /// Returns `Ok(None)` when no record matches both keys.
    ///
    /// # Errors
    ///
    /// - `Database`: the lookup could not be performed
    async fn find_by_event_and_id(
        &self,
        event_id: EventId,
        id: AttendeeId,
    ) -> Result<Option<Attendee>, StoreError>;

    /// Overwrite the mutable fields of the record with primary key `id`.
    ///
    /// The write is scoped by `id` only and is unconditional. Returns the
    /// record as stored after the write.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no record has this primary key
    /// - `Database`: the write failed (connectivity, constraint violation)
    async fn update_by_id(
        &self,
        id: AttendeeId,
        changes: &AttendeeChanges,
    ) -> Result<Attendee, StoreError>;
}
