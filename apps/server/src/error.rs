//! Server error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use todo_store::TodoStoreError;

/// Error codes surfaced in REST responses.
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    pub const DUPLICATE_EMAIL: &str = "DUPLICATE_EMAIL";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] TodoStoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, msg.clone())
            }
            ServerError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, error_codes::RESOURCE_NOT_FOUND, msg.clone())
            }
            ServerError::Store(e) => match e {
                TodoStoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, error_codes::RESOURCE_NOT_FOUND, e.to_string())
                }
                TodoStoreError::DuplicateEmail(_) => {
                    (StatusCode::CONFLICT, error_codes::DUPLICATE_EMAIL, e.to_string())
                }
                TodoStoreError::UserNotFound(_) => {
                    (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, e.to_string())
                }
                _ => {
                    (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR, e.to_string())
                }
            },
            ServerError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR, msg.clone())
            }
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
