//! API endpoints for the attendee service.

pub mod attendees;

pub use attendees::update_attendee;
