//! # Reader Error Types Module
//!
//! This module defines the error types raised by the identifier reader.
//! Only structural problems are errors: a document without a readable
//! identifier is a normal outcome and is reported as `Ok(None)`.

/// Custom error types for identifier reading operations
#[derive(Debug, Clone, PartialEq)]
pub enum ReaderError {
    /// A search or ordering operation was called before any fragments were loaded
    UnloadedState,
    /// The fragment record set does not follow the expected schema
    MalformedInput(String),
    /// The fragment source could not be read from disk
    FileSystem(String),
}

impl std::fmt::Display for ReaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReaderError::UnloadedState => write!(
                f,
                "[UNLOADED] No fragments are loaded. Load an annotation record set first"
            ),
            ReaderError::MalformedInput(msg) => {
                write!(f, "[MALFORMED_INPUT] Fragment record set is invalid: {}", msg)
            }
            ReaderError::FileSystem(msg) => {
                write!(f, "[FILESYSTEM] Failed to read fragment source: {}", msg)
            }
        }
    }
}

impl std::error::Error for ReaderError {}

impl From<std::io::Error> for ReaderError {
    fn from(err: std::io::Error) -> Self {
        ReaderError::FileSystem(err.to_string())
    }
}

/// Result type alias for reader operations
pub type ReaderResult<T> = Result<T, ReaderError>;
