//! Catalog domain errors

use core_kernel::PortError;
use thiserror::Error;
use validator::ValidationErrors;

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Invalid field data provided
    #[error("Invalid passed data err: {0}")]
    InvalidData(String),

    /// One or more validation rules failed
    #[error("Invalid passed data err: {0}")]
    ValidationFailed(String),
}

impl CatalogError {
    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        CatalogError::InvalidData(message.into())
    }

    /// Creates a ValidationFailed error from validation errors
    pub fn validation_failed(errors: Vec<String>) -> Self {
        CatalogError::ValidationFailed(errors.join("; "))
    }
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
                format!("{} ({})", field, codes.join(", "))
            })
            .collect();
        messages.sort();
        CatalogError::validation_failed(messages)
    }
}

impl From<CatalogError> for PortError {
    fn from(error: CatalogError) -> Self {
        PortError::validation(error.to_string())
    }
}
