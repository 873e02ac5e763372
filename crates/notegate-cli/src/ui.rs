//! Styling for messages written to stderr.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

fn styled() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// `Error:` prefix, red and bold when stderr is a terminal.
pub fn error_prefix() -> String {
    if styled() {
        "Error:".red().bold().to_string()
    } else {
        "Error:".to_string()
    }
}

/// `Warning:` prefix, yellow when stderr is a terminal.
pub fn warning_prefix() -> String {
    if styled() {
        "Warning:".yellow().to_string()
    } else {
        "Warning:".to_string()
    }
}
