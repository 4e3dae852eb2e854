//! Attendee records and the partial-update merge.
//!
//! An [`Attendee`] is owned by the store. Callers never build a full record to
//! update one: they send an [`AttendeePatch`] (every field optional), which is
//! coalesced over the current record into a fully-populated
//! [`AttendeeChanges`] before it is written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of the event an attendee is registered to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Create an `EventId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for EventId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Primary key of an attendee record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendeeId(i32);

impl AttendeeId {
    /// Create a new `AttendeeId`
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw integer value
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for AttendeeId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for AttendeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Records
// ============================================================================

/// A person registered to an event.
///
/// `(event_id, id)` identifies at most one record. `id` and `event_id` never
/// change after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attendee {
    /// Primary key
    pub id: AttendeeId,
    /// Owning event
    pub event_id: EventId,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl Attendee {
    /// Apply a fully-populated set of changes, keeping the identity fields.
    #[must_use]
    pub fn with_changes(&self, changes: &AttendeeChanges) -> Self {
        Self {
            id: self.id,
            event_id: self.event_id,
            name: changes.name.clone(),
            email: changes.email.clone(),
            created_at: changes.created_at,
        }
    }
}

/// Sparse update request: any subset of the mutable fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttendeePatch {
    /// New name, if supplied
    pub name: Option<String>,
    /// New email, if supplied
    pub email: Option<String>,
    /// New registration timestamp, if supplied
    pub created_at: Option<DateTime<Utc>>,
}

impl AttendeePatch {
    /// Whether no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.created_at.is_none()
    }

    /// Coalesce this patch over the current record.
    ///
    /// Each field takes the supplied value when present and the current
    /// stored value otherwise, so an empty patch yields the record's own
    /// values.
    #[must_use]
    pub fn merge_onto(self, current: &Attendee) -> AttendeeChanges {
        AttendeeChanges {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            email: self.email.unwrap_or_else(|| current.email.clone()),
            created_at: self.created_at.unwrap_or(current.created_at),
        }
    }
}

/// Fully-populated values written by an update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttendeeChanges {
    /// Name to store
    pub name: String,
    /// Email to store
    pub email: String,
    /// Registration timestamp to store
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn ana() -> Attendee {
        Attendee {
            id: AttendeeId::new(7),
            event_id: EventId::from_uuid(
                Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap(),
            ),
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_merge_replaces_only_supplied_fields() {
        let current = ana();
        let patch = AttendeePatch {
            name: Some("Bobby".to_string()),
            ..AttendeePatch::default()
        };

        let changes = patch.merge_onto(&current);

        assert_eq!(changes.name, "Bobby");
        assert_eq!(changes.email, current.email);
        assert_eq!(changes.created_at, current.created_at);
    }

    #[test]
    fn test_empty_patch_keeps_current_values() {
        let current = ana();
        let patch = AttendeePatch::default();
        assert!(patch.is_empty());

        let changes = patch.merge_onto(&current);

        assert_eq!(current.with_changes(&changes), current);
    }

    #[test]
    fn test_with_changes_keeps_identity() {
        let current = ana();
        let changes = AttendeeChanges {
            name: "Anabel".to_string(),
            email: "anabel@x.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        };

        let updated = current.with_changes(&changes);

        assert_eq!(updated.id, current.id);
        assert_eq!(updated.event_id, current.event_id);
        assert_eq!(updated.name, "Anabel");
    }

    #[test]
    fn test_attendee_id_display() {
        assert_eq!(AttendeeId::new(42).to_string(), "42");
    }

    fn patch_strategy() -> impl Strategy<Value = AttendeePatch> {
        (
            proptest::option::of("[a-z]{4,12}"),
            proptest::option::of("[a-z]{1,8}@[a-z]{1,8}\\.com"),
            proptest::option::of(0_i64..4_000_000_000),
        )
            .prop_map(|(name, email, secs)| AttendeePatch {
                name,
                email,
                created_at: secs.and_then(|s| Utc.timestamp_opt(s, 0).single()),
            })
    }

    proptest! {
        #[test]
        fn prop_merge_is_idempotent(patch in patch_strategy()) {
            let once = ana().with_changes(&patch.clone().merge_onto(&ana()));
            let twice = once.with_changes(&patch.merge_onto(&once));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_merge_coalesces_each_field(patch in patch_strategy()) {
            let current = ana();
            let changes = patch.clone().merge_onto(&current);
            prop_assert_eq!(changes.name, patch.name.unwrap_or(current.name));
            prop_assert_eq!(changes.email, patch.email.unwrap_or(current.email));
            prop_assert_eq!(changes.created_at, patch.created_at.unwrap_or(current.created_at));
        }
    }
}
