//! `PostgreSQL` attendee store for pass-in.
//!
//! Implements [`pass_in_core::AttendeeStore`] with sqlx. Lookups are scoped by
//! `(event_id, id)`; updates by `id` alone, returning the written row.
//!
//! # Example
//!
//! ```ignore
//! use pass_in_core::AttendeeService;
//! use pass_in_postgres::PostgresAttendeeStore;
//! use std::sync::Arc;
//!
//! let store = PostgresAttendeeStore::new("postgres://localhost/pass_in").await?;
//! let service = AttendeeService::new(Arc::new(store));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attendee_store;

pub use attendee_store::PostgresAttendeeStore;
