//! # Notegate Core
//!
//! Core library for Notegate - a minimal, access-gated note viewer.
//!
//! This crate provides the loading, credential checking, and session logic
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **store**: Bounded ingestion of the note store into memory
//! - **gate**: Credential capture, normalization, and comparison
//! - **flow**: The single-attempt `Loading -> Authenticating -> Revealed/Rejected` session

pub mod error;
pub mod flow;
pub mod gate;
pub mod store;

pub use error::{NotegateError, Result};
pub use flow::{run_session, Outcome, Prompter, SessionState};
pub use gate::{AccessGate, AuthDecision, SuppliedSecret};
pub use store::{LoaderLimits, NoteLoader, NoteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
