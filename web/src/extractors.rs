//! Validating Axum extractors.
//!
//! Request shape is a boundary concern: these extractors reject malformed
//! input with a 400 [`AppError`] before any handler logic runs.
//!
//! - [`ValidatedPath`]: path parameters deserialized into a typed struct
//! - [`ValidatedJson`]: JSON body deserialized and checked with [`validator`]
//!
//! # Examples
//!
//! ```ignore
//! use pass_in_web::extractors::{ValidatedJson, ValidatedPath};
//!
//! async fn handler(
//!     ValidatedPath(params): ValidatedPath<AttendeePath>,
//!     ValidatedJson(body): ValidatedJson<UpdateAttendeeRequest>,
//! ) -> Result<Json<Response>, AppError> {
//!     // params and body are well-formed here
//! }
//! ```

use crate::error::AppError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that deserialized and passed its `#[validate(...)]` rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::rejected("body", rejection.body_text()))?;

        value.validate()?;

        Ok(Self(value))
    }
}

/// Path parameters deserialized into `T`.
///
/// Field names of `T` must match the route's `:param` names.
#[derive(Debug, Clone)]
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::rejected("params", rejection.body_text()))?;

        Ok(Self(value))
    }
}
