//! The attendee update use case.
//!
//! ```text
//! find_by_event_and_id ──► None ──► AttendeeError::NotFound (no write)
//!          │
//!          ▼ Some(current)
//!   patch.merge_onto(current)
//!          │
//!          ▼
//!   update_by_id(id, changes) ──► Attendee
//! ```

use crate::attendee::{Attendee, AttendeeId, AttendeePatch, EventId};
use crate::store::{AttendeeStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Message reported to clients when the attendee does not exist.
pub const ATTENDEE_NOT_FOUND: &str = "Attendee not found.";

/// Outcome of a failed update.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttendeeError {
    /// No attendee matches `(event_id, attendee_id)`.
    #[error("{}", ATTENDEE_NOT_FOUND)]
    NotFound {
        /// Event from the request path
        event_id: EventId,
        /// Attendee from the request path
        attendee_id: AttendeeId,
    },

    /// The store failed; propagated unmodified.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Partial updates of attendee records.
///
/// Holds no state of its own beyond the injected store, so it is cheap to
/// clone into every request.
#[derive(Clone)]
pub struct AttendeeService {
    store: Arc<dyn AttendeeStore>,
}

impl AttendeeService {
    /// Create a service backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn AttendeeStore>) -> Self {
        Self { store }
    }

    /// Update the attendee `(event_id, attendee_id)` with the supplied fields.
    ///
    /// Performs one read and, when the attendee exists, one write. The read
    /// and the write are not wrapped in a transaction.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no attendee matches, or the record disappeared before the write
    /// - `Store`: the store failed
    #[tracing::instrument(
        skip(self, patch),
        fields(event_id = %event_id, attendee_id = %attendee_id, empty_patch = patch.is_empty())
    )]
    pub async fn update(
        &self,
        event_id: EventId,
        attendee_id: AttendeeId,
        patch: AttendeePatch,
    ) -> Result<Attendee, AttendeeError> {
        let result = self.apply(event_id, attendee_id, patch).await;

        let outcome = match &result {
            Ok(_) => "updated",
            Err(AttendeeError::NotFound { .. }) => "not_found",
            Err(AttendeeError::Store(_)) => "error",
        };
        metrics::counter!("attendees.update", "outcome" => outcome).increment(1);

        match &result {
            Ok(_) => tracing::info!("Attendee updated"),
            Err(AttendeeError::NotFound { .. }) => tracing::debug!("Attendee not found"),
            Err(AttendeeError::Store(error)) => tracing::warn!(%error, "Attendee update failed"),
        }

        result
    }

    async fn apply(
        &self,
        event_id: EventId,
        attendee_id: AttendeeId,
        patch: AttendeePatch,
    ) -> Result<Attendee, AttendeeError> {
        let not_found = || AttendeeError::NotFound {
            event_id,
            attendee_id,
        };

        let current = self
            .store
            .find_by_event_and_id(event_id, attendee_id)
            .await?
            .ok_or_else(not_found)?;

        let changes = patch.merge_onto(&current);

        match self.store.update_by_id(attendee_id, &changes).await {
            Ok(updated) => Ok(updated),
            Err(StoreError::NotFound(_)) => Err(not_found()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::attendee::AttendeeChanges;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Single-record store that can be told to lose the record before writing.
    struct OneRecordStore {
        record: Mutex<Option<Attendee>>,
        vanish_before_write: bool,
        writes: Mutex<usize>,
    }

    #[async_trait]
    impl AttendeeStore for OneRecordStore {
        async fn find_by_event_and_id(
            &self,
            event_id: EventId,
            id: AttendeeId,
        ) -> Result<Option<Attendee>, StoreError> {
            let record = self.record.lock().unwrap();
            Ok(record
                .as_ref()
                .filter(|a| a.event_id == event_id && a.id == id)
                .cloned())
        }

        async fn update_by_id(
            &self,
            id: AttendeeId,
            changes: &AttendeeChanges,
        ) -> Result<Attendee, StoreError> {
            *self.writes.lock().unwrap() += 1;
            if self.vanish_before_write {
                return Err(StoreError::NotFound(id));
            }
            let mut record = self.record.lock().unwrap();
            let current = record.as_ref().ok_or(StoreError::NotFound(id))?;
            let updated = current.with_changes(changes);
            *record = Some(updated.clone());
            Ok(updated)
        }
    }

    fn event_id() -> EventId {
        EventId::from_uuid(Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap())
    }

    fn store(vanish_before_write: bool) -> Arc<OneRecordStore> {
        Arc::new(OneRecordStore {
            record: Mutex::new(Some(Attendee {
                id: AttendeeId::new(7),
                event_id: event_id(),
                name: "Ana".to_string(),
                email: "ana@x.com".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            })),
            vanish_before_write,
            writes: Mutex::new(0),
        })
    }

    #[tokio::test]
    async fn test_update_merges_supplied_fields() {
        let store = store(false);
        let service = AttendeeService::new(store.clone());

        let updated = service
            .update(
                event_id(),
                AttendeeId::new(7),
                AttendeePatch {
                    email: Some("ana.new@x.com".to_string()),
                    ..AttendeePatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.email, "ana.new@x.com");
        assert_eq!(*store.writes.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_attendee_skips_write() {
        let store = store(false);
        let service = AttendeeService::new(store.clone());

        let error = service
            .update(event_id(), AttendeeId::new(8), AttendeePatch::default())
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), ATTENDEE_NOT_FOUND);
        assert_eq!(*store.writes.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_other_event_is_not_found() {
        let service = AttendeeService::new(store(false));
        let other_event = EventId::from_uuid(Uuid::nil());

        let error = service
            .update(other_event, AttendeeId::new(7), AttendeePatch::default())
            .await
            .unwrap_err();

        assert!(matches!(error, AttendeeError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_record_vanishing_before_write_is_not_found() {
        let service = AttendeeService::new(store(true));

        let error = service
            .update(event_id(), AttendeeId::new(7), AttendeePatch::default())
            .await
            .unwrap_err();

        assert_eq!(
            error,
            AttendeeError::NotFound {
                event_id: event_id(),
                attendee_id: AttendeeId::new(7),
            }
        );
    }
}
