//! Error types for the music library

use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// A duration string did not match the expected layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid duration {input:?}: expected {expected}")]
pub struct FormatError {
    /// The offending text
    pub input: String,

    /// Human-readable description of the accepted layout
    pub expected: &'static str,
}

impl FormatError {
    pub(crate) fn new(input: &str, expected: &'static str) -> Self {
        Self {
            input: input.to_string(),
            expected,
        }
    }
}

/// A playlist's total duration left the representable range
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("playlist duration overflowed")]
pub struct DurationOverflow;

/// Errors raised while loading or saving the library
#[derive(Error, Debug)]
pub enum Error {
    /// A stored duration could not be parsed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Summing song durations overflowed
    #[error(transparent)]
    Overflow(#[from] DurationOverflow),

    /// The backing store exists but could not be read
    #[error("failed to read library file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing store could not be written
    #[error("failed to write library file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing store is not a valid library document
    #[error("malformed library file {path:?}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
