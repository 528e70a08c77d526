//! Error types for the wordindex library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`WordIndexError`] enum.
//!
//! # Examples
//!
//! ```
//! use wordindex::error::{Result, WordIndexError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(WordIndexError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for wordindex operations.
#[derive(Error, Debug)]
pub enum WordIndexError {
    /// I/O errors while reading context windows.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The indexed file does not exist (at construction or at query time).
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A query buffer cannot hold even a single result frame.
    #[error("Undersized buffer: capacity {capacity} bytes, at least {required} bytes required")]
    UndersizedBuffer {
        /// Capacity the caller supplied.
        capacity: usize,
        /// Smallest capacity able to hold one frame.
        required: usize,
    },

    /// Reading the file failed during the initial scan.
    #[error("Failed to index {}: {source}", path.display())]
    Indexing {
        /// File being indexed.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: io::Error,
    },

    /// A continuation handle was presented to a stream it does not belong to.
    #[error("Invalid continuation handle: {0}")]
    InvalidHandle(String),

    /// A buffer did not contain well-formed length-prefixed frames.
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// The index has been closed.
    #[error("Index is closed")]
    Closed,

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON configuration errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors raised by external query backends.
    #[error("Backend error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with WordIndexError.
pub type Result<T> = std::result::Result<T, WordIndexError>;

impl WordIndexError {
    /// Create a new file-not-found error.
    pub fn file_not_found<P: Into<PathBuf>>(path: P) -> Self {
        WordIndexError::FileNotFound(path.into())
    }

    /// Create a new indexing error.
    pub fn indexing<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        WordIndexError::Indexing {
            path: path.into(),
            source,
        }
    }

    /// Create a new undersized buffer error.
    pub fn undersized_buffer(capacity: usize, required: usize) -> Self {
        WordIndexError::UndersizedBuffer { capacity, required }
    }

    /// Create a new invalid handle error.
    pub fn invalid_handle<S: Into<String>>(msg: S) -> Self {
        WordIndexError::InvalidHandle(msg.into())
    }

    /// Create a new malformed frame error.
    pub fn malformed_frame<S: Into<String>>(msg: S) -> Self {
        WordIndexError::MalformedFrame(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        WordIndexError::InvalidArgument(msg.into())
    }

    /// Map an I/O error from opening `path`, turning `NotFound` into
    /// [`WordIndexError::FileNotFound`].
    pub fn from_open<P: Into<PathBuf>>(path: P, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            WordIndexError::FileNotFound(path.into())
        } else {
            WordIndexError::Io(err)
        }
    }

    /// Whether this error means the backing file is missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            WordIndexError::FileNotFound(_) => true,
            WordIndexError::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = WordIndexError::undersized_buffer(16, 39);
        assert_eq!(
            error.to_string(),
            "Undersized buffer: capacity 16 bytes, at least 39 bytes required"
        );

        let error = WordIndexError::file_not_found("/tmp/missing.txt");
        assert_eq!(error.to_string(), "File not found: /tmp/missing.txt");
        assert!(error.is_not_found());

        let error = WordIndexError::invalid_handle("stream mismatch");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_open_error_mapping() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = WordIndexError::from_open("a.txt", io_error);
        assert!(matches!(error, WordIndexError::FileNotFound(_)));

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = WordIndexError::from_open("a.txt", io_error);
        assert!(matches!(error, WordIndexError::Io(_)));
    }

    #[test]
    fn test_indexing_error_keeps_source() {
        use std::error::Error as _;

        let io_error = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        let error = WordIndexError::indexing("corpus.txt", io_error);
        assert!(error.to_string().starts_with("Failed to index corpus.txt"));
        assert!(error.source().is_some());
    }
}
