//! Single-attempt viewing session.
//!
//! `Loading -> Authenticating -> {Revealed, Rejected}`. A failed load ends the
//! session before any prompt is issued, and no state is revisited.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::gate::{AccessGate, SuppliedSecret};
use crate::store::{NoteLoader, NoteStore};

/// Prompt shown before the credential is captured.
pub const PROMPT: &str = "Enter password to display notes: ";

/// Message printed instead of the note when the credential is wrong.
pub const REJECTION_MESSAGE: &str = "ERROR! INVALID PASSWORD!";

/// Source of the supplied credential.
pub trait Prompter {
    /// Show `prompt` and capture a single bounded line.
    fn prompt_secret(&mut self, prompt: &str) -> Result<SuppliedSecret>;
}

/// Session states, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Authenticating,
    Revealed,
    Rejected,
}

/// Terminal result of a session.
#[derive(Debug)]
pub enum Outcome {
    Revealed(NoteStore),
    Rejected,
}

impl Outcome {
    pub fn state(&self) -> SessionState {
        match self {
            Outcome::Revealed(_) => SessionState::Revealed,
            Outcome::Rejected => SessionState::Rejected,
        }
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self, Outcome::Revealed(_))
    }

    /// Write the note verbatim, or the rejection message, followed by a newline.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        match self {
            Outcome::Revealed(note) => out.write_all(note.as_bytes())?,
            Outcome::Rejected => out.write_all(REJECTION_MESSAGE.as_bytes())?,
        }
        out.write_all(b"\n")?;
        Ok(())
    }
}

/// Run one session: load `path`, prompt once, and decide.
///
/// # Errors
///
/// Load failures are returned before `prompter` is called. Prompt failures are
/// returned as-is.
pub fn run_session<P: Prompter + ?Sized>(
    loader: &NoteLoader,
    path: &Path,
    gate: &AccessGate,
    prompter: &mut P,
) -> Result<Outcome> {
    debug!(state = ?SessionState::Loading);
    let note = loader.load(path)?;

    debug!(state = ?SessionState::Authenticating);
    let supplied = prompter.prompt_secret(PROMPT)?;
    let decision = gate.verify(&supplied);
    drop(supplied);

    let outcome = if decision.is_granted() {
        Outcome::Revealed(note)
    } else {
        Outcome::Rejected
    };
    debug!(state = ?outcome.state());
    Ok(outcome)
}
