//! Credential capture and comparison.
//!
//! - The expected secret is wrapped in `SecretString` so it never shows up in
//!   debug output or logs
//! - Supplied input is captured into a fixed bound and zeroized on drop
//! - Comparison requires equal length, then uses `subtle` for the bytes

use std::io::{BufRead, ErrorKind};

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::error::{NotegateError, Result};

/// Maximum bytes captured from input, including the line terminator.
pub const INPUT_CAPACITY: usize = 16;

/// Longest expected secret that still fits a bounded capture with a `\r\n` terminator.
pub const MAX_SECRET_LEN: usize = INPUT_CAPACITY - 2;

/// Outcome of a single credential comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Granted,
    Denied,
}

impl AuthDecision {
    pub fn is_granted(self) -> bool {
        matches!(self, AuthDecision::Granted)
    }
}

impl From<AuthDecision> for bool {
    fn from(decision: AuthDecision) -> Self {
        decision.is_granted()
    }
}

/// A credential as captured from input, before normalization.
pub struct SuppliedSecret {
    raw: Zeroizing<Vec<u8>>,
    overflowed: bool,
}

impl SuppliedSecret {
    /// Wrap input captured by other means (e.g. a hidden terminal prompt).
    ///
    /// Anything past [`INPUT_CAPACITY`] is dropped and the secret is marked
    /// as overflowed.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let kept = bytes.len().min(INPUT_CAPACITY);
        Self {
            raw: Zeroizing::new(bytes[..kept].to_vec()),
            overflowed: bytes.len() > INPUT_CAPACITY,
        }
    }

    /// Bytes as captured, terminator included.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// True when the input did not fit the capture bound.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// The captured bytes with one trailing line terminator removed.
    pub fn normalized(&self) -> &[u8] {
        normalize(&self.raw)
    }
}

impl std::fmt::Debug for SuppliedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuppliedSecret")
            .field("len", &self.raw.len())
            .field("overflowed", &self.overflowed)
            .finish()
    }
}

/// Read one line of at most [`INPUT_CAPACITY`] bytes from `reader`.
///
/// Reading stops after a `\n`, at end of input, or at the bound. If the bound
/// is hit with input still pending, the result is marked as overflowed and
/// the remainder is left unread.
pub fn capture_line<R: BufRead>(reader: &mut R) -> Result<SuppliedSecret> {
    let mut raw = Zeroizing::new(Vec::with_capacity(INPUT_CAPACITY));

    while raw.len() < INPUT_CAPACITY {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        if available.is_empty() {
            return Ok(SuppliedSecret {
                raw,
                overflowed: false,
            });
        }

        let room = INPUT_CAPACITY - raw.len();
        let window = &available[..available.len().min(room)];
        if let Some(pos) = window.iter().position(|&b| b == b'\n') {
            raw.extend_from_slice(&window[..=pos]);
            reader.consume(pos + 1);
            return Ok(SuppliedSecret {
                raw,
                overflowed: false,
            });
        }
        let taken = window.len();
        raw.extend_from_slice(window);
        reader.consume(taken);
    }

    let overflowed = loop {
        match reader.fill_buf() {
            Ok(pending) => break !pending.is_empty(),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    };
    Ok(SuppliedSecret { raw, overflowed })
}

/// Strip a single trailing `\n` or `\r\n`.
pub fn normalize(input: &[u8]) -> &[u8] {
    if let Some(rest) = input.strip_suffix(b"\r\n") {
        return rest;
    }
    input.strip_suffix(b"\n").unwrap_or(input)
}

/// Compare `supplied` against `expected` after normalization.
///
/// Granted only when both length and bytes match; a prefix or an extension
/// of `expected` is denied.
pub fn verify(expected: &[u8], supplied: &[u8]) -> AuthDecision {
    let candidate = normalize(supplied);
    if candidate.len() != expected.len() {
        return AuthDecision::Denied;
    }
    if bool::from(candidate.ct_eq(expected)) {
        AuthDecision::Granted
    } else {
        AuthDecision::Denied
    }
}

/// Holds the expected secret and decides on supplied credentials.
pub struct AccessGate {
    expected: SecretString,
}

impl AccessGate {
    /// Build a gate around `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`NotegateError::InvalidConfig`] if the secret is empty, longer
    /// than [`MAX_SECRET_LEN`] bytes, or contains a line terminator.
    pub fn new(expected: SecretString) -> Result<Self> {
        let bytes = expected.expose_secret().as_bytes();
        if bytes.is_empty() {
            return Err(NotegateError::InvalidConfig(
                "secret must not be empty".to_string(),
            ));
        }
        if bytes.len() > MAX_SECRET_LEN {
            return Err(NotegateError::InvalidConfig(format!(
                "secret must be at most {} bytes",
                MAX_SECRET_LEN
            )));
        }
        if bytes.iter().any(|&b| b == b'\n' || b == b'\r') {
            return Err(NotegateError::InvalidConfig(
                "secret must not contain line terminators".to_string(),
            ));
        }
        Ok(Self { expected })
    }

    /// Decide on a captured credential. Overflowed input is always denied.
    pub fn verify(&self, supplied: &SuppliedSecret) -> AuthDecision {
        let decision = if supplied.overflowed() {
            debug!("supplied credential exceeded capture bound");
            AuthDecision::Denied
        } else {
            verify(self.expected.expose_secret().as_bytes(), supplied.raw())
        };
        info!(granted = decision.is_granted(), "access decision");
        decision
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("expected", &"[REDACTED]")
            .finish()
    }
}
