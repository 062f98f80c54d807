//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::{CoreError, PortError};

/// API error types
///
/// Client mistakes, including references to missing rows and duplicate line
/// items, all answer 400 with the message intact.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, "conflict", msg),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Reference { message, .. } => ApiError::BadRequest(message),
            PortError::Conflict { message } => ApiError::Conflict(message),
            PortError::Validation { message, .. } => ApiError::Validation(message),
            PortError::Connection { .. } | PortError::Timeout { .. } => {
                ApiError::ServiceUnavailable(err.to_string())
            }
            PortError::Internal { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

/// Malformed path ids
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ApiError::BadRequest(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_status_mapping() {
        let cases = [
            (PortError::not_found("Bill", 1), StatusCode::NOT_FOUND),
            (PortError::reference("product", "missing"), StatusCode::BAD_REQUEST),
            (PortError::conflict("dup"), StatusCode::BAD_REQUEST),
            (PortError::validation("bad"), StatusCode::BAD_REQUEST),
            (PortError::connection("refused"), StatusCode::SERVICE_UNAVAILABLE),
            (PortError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (port_error, status) in cases {
            let response = ApiError::from(port_error).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn test_reference_keeps_message() {
        match ApiError::from(PortError::reference("bill", "Passed product or bill not exists")) {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Passed product or bill not exists"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
