//! Error types for page rendering and feed generation.

use thiserror::Error;

use crate::template::TemplateError;

/// Result type alias using `SiteError`.
pub type Result<T> = std::result::Result<T, SiteError>;

/// Rendering errors.
#[derive(Error, Debug)]
pub enum SiteError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Article store error.
    #[error("store error: {0}")]
    Store(#[from] arena_store::StoreError),

    /// Structured data encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
