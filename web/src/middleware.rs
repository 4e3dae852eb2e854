//! Axum middleware for request tracking and cross-origin access.
//!
//! [`with_request_tracing`] wraps a router so that every request:
//!
//! 1. **Gets a request ID** from `x-request-id`, or a fresh UUID v4
//! 2. **Runs inside a tracing span** carrying the request ID, method and URI
//! 3. **Returns the request ID** in the `x-request-id` response header
//!
//! [`cors_layer`] builds the CORS policy from a configured origin.
//!
//! # Example
//!
//! ```ignore
//! use pass_in_web::middleware::{cors_layer, with_request_tracing};
//!
//! let app = with_request_tracing(
//!     Router::new()
//!         .route("/events/:eventId/attendees/:attendeeId", put(update_attendee))
//!         .layer(cors_layer("*")),
//! );
//! ```

use axum::{
    Router,
    body::Body,
    http::{HeaderName, HeaderValue, Request},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Add request ID assignment, propagation and a tracing span to `router`.
#[must_use]
pub fn with_request_tracing<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let header = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(header.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(PropagateRequestIdLayer::new(header)),
    )
}

/// CORS policy allowing `allowed_origin`, or any origin for `"*"`.
///
/// An origin that is not a valid header value falls back to any origin.
#[must_use]
pub fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let origin = if allowed_origin == "*" {
        AllowOrigin::from(Any)
    } else if let Ok(value) = HeaderValue::from_str(allowed_origin) {
        AllowOrigin::exact(value)
    } else {
        tracing::warn!(allowed_origin, "Invalid CORS origin, allowing any origin");
        AllowOrigin::from(Any)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
