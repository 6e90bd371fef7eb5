//! Document store error types.

use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file does not exist.
    #[error("document not found: {path}")]
    NotFound {
        /// Path of the missing file.
        path: String,
    },

    /// Reading or writing the backing file failed.
    #[error("io error on {path}")]
    Io {
        /// Path of the file being accessed.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The on-disk content could not be parsed into a document.
    #[error("malformed document {path}: {message}")]
    Malformed {
        /// Path of the offending file.
        path: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The document could not be rendered in the store's syntax.
    #[error("cannot serialize document {path}: {message}")]
    Serialize {
        /// Path of the destination file.
        path: String,
        /// Serializer diagnostic.
        message: String,
    },

    /// The file extension does not map to a known store.
    #[error("unsupported document format: {path}")]
    UnsupportedFormat {
        /// Path whose extension was not recognized.
        path: String,
    },
}

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;
