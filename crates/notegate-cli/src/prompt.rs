//! Credential capture from the terminal or a pipe.

use std::io::{self, IsTerminal, Write};

use dialoguer::Password;
use zeroize::Zeroizing;

use notegate_core::gate::capture_line;
use notegate_core::{NotegateError, Prompter, SuppliedSecret};

/// Reads the password from stdin.
///
/// On a TTY the input is hidden via `dialoguer`; otherwise the prompt is
/// written to stdout and one bounded line is read.
pub struct StdinPrompter {
    interactive: bool,
}

impl StdinPrompter {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for StdinPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for StdinPrompter {
    fn prompt_secret(&mut self, prompt: &str) -> notegate_core::Result<SuppliedSecret> {
        if self.interactive {
            // dialoguer appends its own ": " to the label.
            let label = prompt.trim_end().trim_end_matches(':');
            let value = Zeroizing::new(
                Password::new()
                    .with_prompt(label)
                    .allow_empty_password(true)
                    .interact()
                    .map_err(|e| {
                        NotegateError::InvalidInput(format!("Failed to read password: {}", e))
                    })?,
            );
            return Ok(SuppliedSecret::from_bytes(value.as_bytes()));
        }

        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut stdin = io::stdin().lock();
        let supplied = capture_line(&mut stdin)?;

        writeln!(stdout)?;
        Ok(supplied)
    }
}
