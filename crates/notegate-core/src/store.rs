//! Bounded loading of the note store.
//!
//! The note store is a raw byte file whose logical content ends at the first
//! delimiter byte. Anything after the delimiter is ignored. Ingestion never
//! grows the buffer past the configured capacity; content beyond it is
//! dropped and the resulting [`NoteStore`] is flagged as truncated.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{NotegateError, Result};

/// Default maximum number of note bytes held in memory.
pub const DEFAULT_CAPACITY: usize = 100_000;

/// Default byte marking the logical end of the note.
pub const DEFAULT_DELIMITER: u8 = b'~';

/// Default note store location, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "user.db";

/// Capacity and delimiter applied while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderLimits {
    capacity: usize,
    delimiter: u8,
}

impl LoaderLimits {
    /// Build limits, rejecting a zero capacity.
    pub fn new(capacity: usize, delimiter: u8) -> Result<Self> {
        if capacity == 0 {
            return Err(NotegateError::InvalidConfig(
                "capacity must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            delimiter,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Default for LoaderLimits {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Note content held in memory for the lifetime of a session.
///
/// Never longer than its capacity and never contains the delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteStore {
    content: Vec<u8>,
    limits: LoaderLimits,
    truncated: bool,
}

impl NoteStore {
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.limits.capacity
    }

    pub fn delimiter(&self) -> u8 {
        self.limits.delimiter
    }

    /// True when the source held more content than the capacity allowed.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Reads a note store into a [`NoteStore`] under fixed [`LoaderLimits`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteLoader {
    limits: LoaderLimits,
}

impl NoteLoader {
    pub fn new(limits: LoaderLimits) -> Self {
        Self { limits }
    }

    /// Open `path` and load its content.
    ///
    /// The file handle lives only for the duration of this call.
    ///
    /// # Errors
    ///
    /// Returns [`NotegateError::NotFound`] if the file does not exist and
    /// [`NotegateError::Io`] if it cannot be opened or read.
    pub fn load(&self, path: &Path) -> Result<NoteStore> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(NotegateError::NotFound(path.to_path_buf()));
            }
            Err(err) => {
                return Err(NotegateError::Io(format!(
                    "Failed to open {}: {}",
                    path.display(),
                    err
                )));
            }
        };
        debug!(path = %path.display(), "opened note store");
        self.load_from_reader(file)
    }

    /// Load note content from any byte source.
    ///
    /// Stops at the first delimiter, at end of input, or at capacity. When the
    /// capacity is reached the next byte is inspected: only a non-delimiter
    /// byte marks the note as truncated.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<NoteStore> {
        let capacity = self.limits.capacity;
        let delimiter = self.limits.delimiter;
        let mut reader = BufReader::new(reader);
        let mut content = Vec::with_capacity(capacity.min(8 * 1024));
        let mut truncated = false;

        loop {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    return Err(NotegateError::Io(format!(
                        "Failed to read note store: {}",
                        err
                    )))
                }
            };
            if chunk.is_empty() {
                break;
            }

            let (end, hit_delimiter) = match chunk.iter().position(|&b| b == delimiter) {
                Some(pos) => (pos, true),
                None => (chunk.len(), false),
            };
            let room = capacity - content.len();
            if end > room {
                content.extend_from_slice(&chunk[..room]);
                truncated = true;
                break;
            }
            content.extend_from_slice(&chunk[..end]);
            if hit_delimiter {
                break;
            }
            reader.consume(end);
        }

        if truncated {
            warn!(capacity, "note content exceeded capacity and was truncated");
        }
        debug!(bytes = content.len(), truncated, "note store loaded");

        Ok(NoteStore {
            content,
            limits: self.limits,
            truncated,
        })
    }
}
