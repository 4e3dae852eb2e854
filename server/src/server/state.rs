//! Application state for the attendee HTTP server.

use axum::extract::FromRef;
use pass_in_core::{AttendeeService, AttendeeStore};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; the store behind the service is shared via `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Attendee update use case
    pub attendees: AttendeeService,
}

impl AppState {
    /// Create application state backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn AttendeeStore>) -> Self {
        Self {
            attendees: AttendeeService::new(store),
        }
    }
}

// Lets handlers extract `State<AttendeeService>` directly
impl FromRef<AppState> for AttendeeService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.attendees.clone()
    }
}
