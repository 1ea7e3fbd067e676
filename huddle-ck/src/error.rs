//! HTTP error mapping for huddle-ck
//!
//! Service code returns `huddle_common::Error`; this wrapper decides the
//! status code and JSON body once, at the handler boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use huddle_common::Error;
use serde_json::json;
use thiserror::Error as ThisError;

/// API error type
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Typed service error
    #[error(transparent)]
    Common(#[from] Error),

    /// Handler-local failure outside the common taxonomy
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Common(err) => match err {
                Error::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg),
                Error::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
                Error::DuplicateKey(msg) => (StatusCode::CONFLICT, "DUPLICATE", msg),
                Error::PermissionDenied(msg) => (StatusCode::FORBIDDEN, "PERMISSION_DENIED", msg),
                Error::PolicyViolation(msg) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "POLICY_VIOLATION", msg)
                }
                Error::StoreUnavailable(msg) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE", msg)
                }
                Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", msg),
                Error::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR", e.to_string()),
                Error::Unknown(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            },
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
