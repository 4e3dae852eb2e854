//! Axum boundary for pass-in.
//!
//! Everything between the HTTP request and the domain service lives here:
//!
//! ```text
//! request ──► middleware (request id, tracing span, CORS)
//!         ──► extractors (ValidatedPath, ValidatedJson)  ── 400 on bad input
//!         ──► handler ──► AttendeeService
//!         ◄── AppError::into_response                    ── 404 / 500 bodies
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::{AppError, VALIDATION_FAILED};
pub use extractors::{ValidatedJson, ValidatedPath};
pub use middleware::{REQUEST_ID_HEADER, cors_layer, with_request_tracing};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
