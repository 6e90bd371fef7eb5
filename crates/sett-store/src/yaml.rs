//! YAML file backend.
//!
//! Parses through the shared [`Document`] type, so a document written as
//! YAML and re-read compares equal to the same document written as JSON —
//! same key ordering, same null/int/float/string distinctions.

use std::path::Path;

use crate::error::{StoreError, StoreResult};
use crate::{Document, DocumentStore, read_to_string_limited, write_string};

/// Document store backed by a YAML file.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlStore;

impl YamlStore {
    /// Create a YAML store.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for YamlStore {
    fn write(&self, path: &Path, document: &Document) -> StoreResult<()> {
        let rendered = serde_yaml::to_string(document).map_err(|e| StoreError::Serialize {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        write_string(path, &rendered)
    }

    fn read(&self, path: &Path) -> StoreResult<Document> {
        let content = read_to_string_limited(path)?;
        serde_yaml::from_str(&content).map_err(|e| StoreError::Malformed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        let mut nested = Document::new();
        nested.insert("first".to_owned(), serde_json::Value::from("derp"));
        nested.insert("2".to_owned(), serde_json::Value::from(2.5));

        let mut doc = Document::new();
        doc.insert("name".to_owned(), serde_json::Value::from("sett"));
        doc.insert("token".to_owned(), serde_json::Value::Null);
        doc.insert("mapping".to_owned(), serde_json::Value::Object(nested));
        doc
    }

    #[test]
    fn test_write_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let store = YamlStore::new();

        let doc = sample_document();
        store.write(&path, &doc).unwrap();
        let loaded = store.read(&path).unwrap();

        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_numeric_looking_key_stays_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let store = YamlStore::new();

        store.write(&path, &sample_document()).unwrap();
        let loaded = store.read(&path).unwrap();

        let mapping = loaded["mapping"].as_object().unwrap();
        assert_eq!(mapping["2"], serde_json::Value::from(2.5));
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = YamlStore::new();
        let result = store.read(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_read_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "name: [unclosed").unwrap();

        let store = YamlStore::new();
        let result = store.read(&path);
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_read_scalar_document_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "just a string\n").unwrap();

        let store = YamlStore::new();
        let result = store.read(&path);
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }
}
