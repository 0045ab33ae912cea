//! Common extractors for API handlers.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ErrorCode};

/// Validated UUID helper
///
/// Use this to parse and validate UUIDs from string path parameters.
///
/// # Example
/// ```ignore
/// let uuid = ValidatedUuid::parse(&id_string)?;
/// ```
pub struct ValidatedUuid;

impl ValidatedUuid {
    /// Parse a string into a UUID, returning an ApiError on failure
    pub fn parse(s: &str) -> Result<Uuid, ApiError> {
        Uuid::parse_str(s).map_err(|_| {
            ApiError::validation_field(
                ErrorCode::InvalidFormat,
                "id",
                format!("Invalid UUID: {}", s),
            )
        })
    }
}

/// JSON body extractor that also runs `validator` rules.
///
/// Body rejections and rule violations both surface as structured
/// [`ApiError`] responses instead of axum's plain-text rejections.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
