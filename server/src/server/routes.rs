//! Router configuration for the attendee service.

use super::state::AppState;
use crate::api::attendees;
use axum::{
    Router,
    routing::{get, put},
};
use pass_in_web::handlers::health_check;
use pass_in_web::{cors_layer, with_request_tracing};

/// Build the complete Axum router.
///
/// - `GET /health`
/// - `PUT /events/:eventId/attendees/:attendeeId`
///
/// Every route is wrapped in request-ID tracing and the CORS policy for
/// `cors_origin` (`"*"` for any origin).
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route(
            "/events/:eventId/attendees/:attendeeId",
            put(attendees::update_attendee),
        )
        .layer(cors_layer(cors_origin))
        .with_state(state);

    with_request_tracing(router)
}
