//! # pass-in testing
//!
//! Testing utilities for the attendee service.
//!
//! This crate provides:
//! - [`InMemoryAttendeeStore`]: a fake [`pass_in_core::AttendeeStore`] that
//!   counts reads and writes
//! - [`fixtures`]: canonical attendee records
//! - [`init_tracing`]: log output captured by the test harness
//!
//! ## Example
//!
//! ```ignore
//! use pass_in_core::AttendeeService;
//! use pass_in_testing::{InMemoryAttendeeStore, fixtures};
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_update() {
//!     let store = InMemoryAttendeeStore::with_attendees([fixtures::ana()]);
//!     let service = AttendeeService::new(Arc::new(store.clone()));
//!     // ...
//!     assert_eq!(store.writes(), 1);
//! }
//! ```

mod attendee_mocks;

pub use attendee_mocks::InMemoryAttendeeStore;

/// Canonical records used across test suites.
pub mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use pass_in_core::{Attendee, AttendeeId, EventId};
    use uuid::Uuid;

    /// `11111111-1111-1111-1111-111111111111`
    #[must_use]
    pub const fn event_id() -> EventId {
        EventId::from_uuid(Uuid::from_u128(0x1111_1111_1111_1111_1111_1111_1111_1111))
    }

    /// `22222222-2222-2222-2222-222222222222`
    #[must_use]
    pub const fn other_event_id() -> EventId {
        EventId::from_uuid(Uuid::from_u128(0x2222_2222_2222_2222_2222_2222_2222_2222))
    }

    /// `2024-01-01T00:00:00Z`
    #[must_use]
    pub fn jan_first_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    /// Attendee 7 of [`event_id`]: Ana, `ana@x.com`, registered [`jan_first_2024`].
    #[must_use]
    pub fn ana() -> Attendee {
        Attendee {
            id: AttendeeId::new(7),
            event_id: event_id(),
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            created_at: jan_first_2024(),
        }
    }

    /// Attendee 8 of [`other_event_id`].
    #[must_use]
    pub fn carlos() -> Attendee {
        Attendee {
            id: AttendeeId::new(8),
            event_id: other_event_id(),
            name: "Carlos".to_string(),
            email: "carlos@x.com".to_string(),
            created_at: jan_first_2024(),
        }
    }
}

/// Install a `tracing` subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pass_in=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
