//! Error types for Notegate core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Notegate operations.
pub type Result<T> = std::result::Result<T, NotegateError>;

/// Core error type for Notegate operations.
#[derive(Debug, Error)]
pub enum NotegateError {
    /// Note store does not exist
    #[error("Note store not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Note store or terminal could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// Rejected configuration value (capacity, delimiter, secret)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for NotegateError {
    fn from(err: std::io::Error) -> Self {
        NotegateError::Io(err.to_string())
    }
}
