//! Configuration engine error types.

use std::path::PathBuf;

use sett_store::StoreError;
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A document store operation failed (missing file, I/O failure,
    /// malformed content).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An incoming document value cannot be reconciled with the declared
    /// field kind.
    #[error("field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Dotted path of the offending field.
        field: String,
        /// Kind required by the declaration.
        expected: &'static str,
        /// Kind actually present in the document.
        found: &'static str,
    },

    /// A field name that is not part of the declared schema.
    #[error("unknown field '{field}'")]
    UnknownField {
        /// Dotted path of the undeclared field.
        field: String,
    },

    /// A declared value that cannot be represented in the wire mapping.
    #[error("field '{field}': {message}")]
    UnsupportedValue {
        /// Dotted path of the offending field.
        field: String,
        /// What made the value unserializable.
        message: String,
    },

    /// Resolving a relative path would leave the configured root directory.
    #[error("path '{}' escapes root '{}'", path.display(), root.display())]
    PathEscapesRoot {
        /// The offending path as given.
        path: PathBuf,
        /// The root directory it must stay inside.
        root: PathBuf,
    },
}

impl ConfigError {
    /// Whether this error is the backing file being absent — the one
    /// condition callers of `load`/`sync` commonly branch on.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(StoreError::NotFound { .. }))
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
