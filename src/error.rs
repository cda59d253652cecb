//! Error types for the Quarry library.
//!
//! All fallible operations return [`Result`], whose error type is
//! [`QuarryError`]. Configuration problems (no scope anchor, malformed
//! settings) surface before any index call is made; index execution
//! failures are propagated unchanged from the collaborator.

use std::io;

use thiserror::Error;

/// The main error type for Quarry operations.
#[derive(Error, Debug)]
pub enum QuarryError {
    /// I/O errors (surfaced by index collaborators).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors (missing scope anchor, invalid settings).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Index-related errors (resolution, execution).
    #[error("Index error: {0}")]
    Index(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with QuarryError.
pub type Result<T> = std::result::Result<T, QuarryError>;

impl QuarryError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        QuarryError::Configuration(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        QuarryError::Index(msg.into())
    }
}
