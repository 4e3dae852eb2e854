//! pass-in attendee server.
//!
//! Wires the attendee update use case to HTTP:
//!
//! ```text
//! PUT /events/:eventId/attendees/:attendeeId
//!   ──► ValidatedPath<AttendeePath> + ValidatedJson<UpdateAttendeeRequest>
//!   ──► AttendeeService::update(event_id, attendee_id, patch)
//!   ──► 200 {"attendee": {...}} | 404 {"message": "Attendee not found."}
//! ```
//!
//! The binary in `main.rs` backs the service with `PostgresAttendeeStore`;
//! tests build the same router over an in-memory store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod server;

pub use config::Config;
pub use server::{AppState, build_router};
