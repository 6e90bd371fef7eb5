//! Sett document stores — the persistence collaborators for `sett-config`.
//!
//! A [`DocumentStore`] serializes a nested [`Document`] mapping to a backing
//! file and reads it back. The engine crate never touches a serialization
//! syntax directly; it hands a document to whichever store the root was
//! constructed with.
//!
//! Two backends ship here:
//!
//! - [`JsonStore`] — pretty-printed JSON.
//! - [`YamlStore`] — YAML, parsed through the same [`Document`] type so the
//!   null/int/float/string distinctions and key ordering match the JSON
//!   backend exactly.
//!
//! [`for_path`] selects a backend from the file extension (`config.json`,
//! `config.yaml`, `config.yml`).

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::Path;

pub mod error;
pub mod json;
pub mod yaml;

pub use error::{StoreError, StoreResult};
pub use json::JsonStore;
pub use yaml::YamlStore;

/// A nested mapping of primitive values, the unit of persistence.
///
/// String keys, insertion order preserved. Values are restricted to null,
/// boolean, integer, float, string, sequences of these, and nested mappings
/// of these — enough to represent both JSON and YAML documents losslessly
/// for this system's purposes.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Maximum accepted backing-file size (1 MiB).
pub const MAX_DOCUMENT_SIZE: u64 = 1_048_576;

/// Reads and writes a whole [`Document`] at a file path.
///
/// Calls open, fully read or write, and release the file; nothing holds the
/// file open across calls. Concurrent writers are out of scope (last writer
/// wins).
pub trait DocumentStore {
    /// Serialize `document` and write it to `path`, creating or overwriting
    /// the file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the parent directory does not exist or
    /// is not writable, and [`StoreError::Serialize`] if the document cannot
    /// be rendered in the store's syntax.
    fn write(&self, path: &Path, document: &Document) -> StoreResult<()>;

    /// Read and parse the whole document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `path` does not exist and
    /// [`StoreError::Malformed`] if the content does not parse into a
    /// mapping.
    fn read(&self, path: &Path) -> StoreResult<Document>;

    /// Whether a backing file currently exists at `path`.
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Select a store from the file extension of `path`.
///
/// `json` maps to [`JsonStore`], `yaml`/`yml` to [`YamlStore`].
///
/// # Errors
///
/// Returns [`StoreError::UnsupportedFormat`] for any other extension.
pub fn for_path(path: &Path) -> StoreResult<Box<dyn DocumentStore + Send + Sync>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Box::new(JsonStore::new())),
        Some("yaml" | "yml") => Ok(Box::new(YamlStore::new())),
        _ => Err(StoreError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Read a backing file to a string, mapping a missing file to
/// [`StoreError::NotFound`] and rejecting oversized content before any
/// parsing happens.
///
/// A single read operation — no separate exists/metadata probe before the
/// read (no TOCTOU window).
pub(crate) fn read_to_string_limited(path: &Path) -> StoreResult<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "backing file not found");
            return Err(StoreError::NotFound {
                path: path.display().to_string(),
            });
        },
        Err(e) => {
            return Err(StoreError::Io {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() as u64 > MAX_DOCUMENT_SIZE {
        return Err(StoreError::Malformed {
            path: path.display().to_string(),
            message: format!(
                "file is {} bytes, exceeding the {MAX_DOCUMENT_SIZE} byte limit",
                content.len()
            ),
        });
    }

    Ok(content)
}

/// Write rendered content to `path`, mapping filesystem failures to
/// [`StoreError::Io`].
pub(crate) fn write_string(path: &Path, content: &str) -> StoreResult<()> {
    std::fs::write(path, content).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
