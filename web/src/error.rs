//! Error types for web handlers.
//!
//! This module bridges domain errors and HTTP responses. Every failure leaving
//! a handler or extractor is an [`AppError`], rendered as a JSON body:
//!
//! ```json
//! { "message": "Attendee not found." }
//! { "message": "Error during validation", "errors": { "name": ["..."] } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pass_in_core::AttendeeError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use validator::ValidationErrors;

/// Message used for every request that fails validation.
pub const VALIDATION_FAILED: &str = "Error during validation";

/// Application error type for web handlers.
///
/// Implements Axum's `IntoResponse`, so handlers and extractors can return it
/// directly.
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Json<Data>, AppError> {
///     let attendee = service.update(event_id, attendee_id, patch).await?;
///     Ok(Json(attendee.into()))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for logs)
    code: &'static str,
    /// Per-field error messages (validation failures only)
    errors: Option<Value>,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: &'static str) -> Self {
        Self {
            status,
            message,
            code,
            errors: None,
            source: None,
        }
    }

    /// Attach the underlying error for logging.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach per-field error messages, exposed under `errors`.
    #[must_use]
    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message.into(), "NOT_FOUND")
    }

    /// Create a 400 validation error with no field details.
    #[must_use]
    pub fn validation() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            VALIDATION_FAILED.to_string(),
            "VALIDATION_ERROR",
        )
    }

    /// Create a 400 validation error reporting `detail` under `key`.
    ///
    /// Used for input rejected before field-level validation can run
    /// (malformed JSON, unparseable path parameters).
    #[must_use]
    pub fn rejected(key: &str, detail: impl Into<String>) -> Self {
        let mut errors = Map::new();
        errors.insert(
            key.to_string(),
            Value::Array(vec![Value::String(detail.into())]),
        );
        Self::validation().with_errors(Value::Object(errors))
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR",
        )
    }

    /// HTTP status this error renders with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Human-readable error message.
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        } else {
            tracing::debug!(status = %self.status, code = self.code, "Request rejected");
        }

        let body = ErrorResponse {
            message: self.message,
            errors: self.errors,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}

impl From<AttendeeError> for AppError {
    fn from(err: AttendeeError) -> Self {
        match err {
            AttendeeError::NotFound { .. } => Self::not_found(err.to_string()),
            AttendeeError::Store(store) => anyhow::Error::new(store).into(),
        }
    }
}

/// Field errors become `{ field: [message, ..] }`; a rule without a custom
/// message reports its code.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        Value::String(
                            e.message
                                .as_ref()
                                .map_or_else(|| e.code.to_string(), ToString::to_string),
                        )
                    })
                    .collect();
                (field.to_string(), Value::Array(messages))
            })
            .collect();

        Self::validation().with_errors(Value::Object(fields))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use pass_in_core::{AttendeeId, EventId, StoreError};
    use validator::Validate;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_error_display() {
        let err = AppError::not_found("Attendee not found.");
        assert_eq!(err.to_string(), "[NOT_FOUND] Attendee not found.");
    }

    #[tokio::test]
    async fn test_attendee_not_found_maps_to_404() {
        let err = AppError::from(AttendeeError::NotFound {
            event_id: EventId::from_uuid(uuid::Uuid::nil()),
            attendee_id: AttendeeId::new(1),
        });

        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "message": "Attendee not found." }));
    }

    #[tokio::test]
    async fn test_store_failure_hides_details() {
        let err = AppError::from(AttendeeError::Store(StoreError::Database(
            "connection refused".to_string(),
        )));
        assert!(std::error::Error::source(&err).is_some());

        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "message": "An internal error occurred" }));
    }

    #[tokio::test]
    async fn test_rejected_reports_detail_under_key() {
        let (status, body) = body_json(AppError::rejected("params", "bad uuid")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({
                "message": "Error during validation",
                "errors": { "params": ["bad uuid"] }
            })
        );
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 4, message = "too short"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[tokio::test]
    async fn test_validation_errors_grouped_by_field() {
        let sample = Sample {
            name: "abc".to_string(),
            email: "nope".to_string(),
        };
        let err = AppError::from(sample.validate().unwrap_err());

        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], VALIDATION_FAILED);
        assert_eq!(body["errors"]["name"], serde_json::json!(["too short"]));
        assert_eq!(body["errors"]["email"], serde_json::json!(["email"]));
    }
}
