//! # pass-in core
//!
//! Domain types and the attendee update use case.
//!
//! ```text
//! PUT /events/:eventId/attendees/:attendeeId
//!        │
//!        ▼
//! AttendeeService::update ──► AttendeeStore::find_by_event_and_id
//!        │                    AttendeeStore::update_by_id
//!        ▼
//! Attendee | AttendeeError::NotFound | AttendeeError::Store
//! ```
//!
//! Nothing here knows about HTTP or SQL: the store is a trait object injected
//! at wiring time, and request validation happens at the web boundary before
//! an [`AttendeePatch`] is built.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attendee;
pub mod service;
pub mod store;

pub use attendee::{Attendee, AttendeeChanges, AttendeeId, AttendeePatch, EventId};
pub use service::{ATTENDEE_NOT_FOUND, AttendeeError, AttendeeService};
pub use store::{AttendeeStore, StoreError};
