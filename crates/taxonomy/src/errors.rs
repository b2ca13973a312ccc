//! Error types for catalog loading.

use thiserror::Error;

/// Type alias for Result using the catalog error type.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while building or loading a taxonomy catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON for the catalog schema.
    #[error("Failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog is structurally inconsistent.
    #[error("Invalid catalog: {0}")]
    Invalid(String),
}
