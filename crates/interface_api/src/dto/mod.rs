//! Request DTOs and the validating JSON extractor
//!
//! Required fields are `Option`s marked `#[validate(required)]`, so a missing
//! field is reported by validation with the field name rather than as a
//! generic JSON decoding error.

pub mod product;
pub mod customer;
pub mod bill;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// JSON body that has passed its `validator` rules
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "Rejected request body");
                ApiError::BadRequest("Cannot parse json data".to_string())
            })?;

        value
            .validate()
            .map_err(|e| ApiError::Validation(format!("Invalid passed data err: {}", e)))?;

        Ok(ValidatedJson(value))
    }
}
