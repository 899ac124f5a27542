//! Error types for the article store.

use thiserror::Error;

/// Result type alias using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Store and authoring errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No article with this id.
    #[error("article {0} not found")]
    NotFound(i64),

    /// Rejected authoring input.
    #[error("{0}")]
    Validation(String),

    /// Slug already taken.
    #[error("slug already exists: {0}")]
    Conflict(String),

    /// Database connectivity or query error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Upload area I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a new validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
