//! Attendee API endpoints.
//!
//! - PUT /events/:eventId/attendees/:attendeeId - Partially update an attendee

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use pass_in_core::{Attendee, AttendeePatch, AttendeeService, EventId};
use pass_in_web::{AppError, ValidatedJson, ValidatedPath};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Path parameters identifying one attendee of one event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeePath {
    /// Owning event
    pub event_id: Uuid,
    /// Attendee primary key
    #[serde(deserialize_with = "integral_number")]
    pub attendee_id: i32,
}

/// Request to update an attendee. Every field is optional.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendeeRequest {
    /// Updated name
    #[serde(default, deserialize_with = "present")]
    #[validate(length(min = 4, message = "String must contain at least 4 character(s)"))]
    pub name: Option<String>,
    /// Updated email
    #[serde(default, deserialize_with = "present")]
    #[validate(email(message = "Invalid email"), custom(function = "dotted_domain"))]
    pub email: Option<String>,
    /// Updated registration timestamp
    #[serde(default, deserialize_with = "present")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Optional field that, when sent, must hold a value: `null` is a type error.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Path segment read as a number that must be a whole `i32` (`7`, `07`, `+7`, `7.0`).
#[allow(clippy::cast_possible_truncation)] // Range and integrality checked first
fn integral_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    use de::Error as _;

    let raw = String::deserialize(deserializer)?;
    let number: f64 = raw
        .trim()
        .parse()
        .map_err(|_| D::Error::custom(format!("Expected number, received \"{raw}\"")))?;

    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&number);
    if !in_range || number.fract().abs() > 0.0 {
        return Err(D::Error::custom(format!("Expected integer, received {raw}")));
    }

    Ok(number as i32)
}

/// Domain part must contain a dot (`ana@x` is rejected).
fn dotted_domain(email: &str) -> Result<(), ValidationError> {
    match email.rsplit_once('@') {
        Some((_, domain)) if !domain.contains('.') => {
            Err(ValidationError::new("email").with_message(Cow::Borrowed("Invalid email")))
        }
        _ => Ok(()),
    }
}

impl From<UpdateAttendeeRequest> for AttendeePatch {
    fn from(request: UpdateAttendeeRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            created_at: request.created_at,
        }
    }
}

/// Attendee as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeBody {
    /// Attendee primary key
    pub id: i32,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Attendee> for AttendeeBody {
    fn from(attendee: Attendee) -> Self {
        Self {
            id: attendee.id.value(),
            name: attendee.name,
            email: attendee.email,
            created_at: attendee.created_at,
        }
    }
}

/// Response after updating an attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAttendeeResponse {
    /// The attendee as stored after the update
    pub attendee: AttendeeBody,
}

// ============================================================================
// Handlers
// ============================================================================

/// Partially update an attendee.
///
/// Fields absent from the body keep their stored values; an empty body
/// rewrites the record unchanged.
///
/// # Example
///
/// ```bash
/// curl -X PUT http://localhost:3333/events/11111111-1111-1111-1111-111111111111/attendees/7 \
///   -H "Content-Type: application/json" \
///   -d '{ "email": "ana.new@x.com" }'
/// ```
///
/// # Errors
///
/// - 400 when the path or body fails validation
/// - 404 `{"message": "Attendee not found."}` when no attendee matches
/// - 500 when the store fails
pub async fn update_attendee(
    State(service): State<AttendeeService>,
    ValidatedPath(path): ValidatedPath<AttendeePath>,
    ValidatedJson(request): ValidatedJson<UpdateAttendeeRequest>,
) -> Result<Json<UpdateAttendeeResponse>, AppError> {
    let attendee = service
        .update(
            EventId::from_uuid(path.event_id),
            path.attendee_id.into(),
            request.into(),
        )
        .await?;

    Ok(Json(UpdateAttendeeResponse {
        attendee: attendee.into(),
    }))
}
