//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use notegate_core::NotegateError;

use crate::ui;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (note store, config file)
    NotFound { message: String, hint: String },

    /// Wrong password
    AuthFailed,

    /// Invalid configuration or user input
    InvalidInput(String),

    /// Note store could not be opened or read
    Io(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed => write!(f, "Invalid password."),
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::Io(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl From<NotegateError> for CliError {
    fn from(err: NotegateError) -> Self {
        match err {
            NotegateError::NotFound(path) => CliError::not_found(
                format!("Note store not found: {}", path.display()),
                "Hint: Create the file or point --store at an existing note store.",
            ),
            NotegateError::Io(message) => CliError::Io(message),
            NotegateError::InvalidConfig(message) | NotegateError::InvalidInput(message) => {
                CliError::InvalidInput(message)
            }
        }
    }
}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Io(_) => exit_codes::IO_FAILED,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    ///
    /// `AuthFailed` prints nothing here; the rejection message has already
    /// gone to stdout.
    pub fn exit(&self) -> ! {
        if !matches!(self, CliError::AuthFailed) {
            eprintln!("{} {}", ui::error_prefix(), self);
        }
        std::process::exit(self.exit_code())
    }
}
