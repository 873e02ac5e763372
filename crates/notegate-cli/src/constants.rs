//! Constants used throughout the CLI.

/// Expected secret compiled into the binary.
///
/// Set `NOTEGATE_SECRET` at build time to change it; `[access] secret` in the
/// config file overrides it at runtime.
pub const DEFAULT_SECRET: &str = match option_env!("NOTEGATE_SECRET") {
    Some(secret) => secret,
    None => "h",
};

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Note store or config file not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid configuration or input.
    pub const INVALID_INPUT: i32 = 4;

    /// Wrong password.
    pub const AUTH_FAILED: i32 = 5;

    /// Note store could not be read.
    pub const IO_FAILED: i32 = 6;
}
