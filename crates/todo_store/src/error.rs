//! Todo store error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum TodoStoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A user with this email already exists.
    #[error("user with email already exists: {0}")]
    DuplicateEmail(String),

    /// A todo referenced a user that does not exist.
    #[error("referenced user not found: {0}")]
    UserNotFound(Uuid),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl TodoStoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }
}

/// Result type for store operations.
pub type TodoStoreResult<T> = Result<T, TodoStoreError>;
