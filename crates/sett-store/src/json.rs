//! JSON file backend.

use std::path::Path;

use crate::error::{StoreError, StoreResult};
use crate::{Document, DocumentStore, read_to_string_limited, write_string};

/// Document store backed by a pretty-printed JSON file.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl JsonStore {
    /// Create a JSON store.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for JsonStore {
    fn write(&self, path: &Path, document: &Document) -> StoreResult<()> {
        let mut rendered =
            serde_json::to_string_pretty(document).map_err(|e| StoreError::Serialize {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        rendered.push('\n');
        write_string(path, &rendered)
    }

    fn read(&self, path: &Path) -> StoreResult<Document> {
        let content = read_to_string_limited(path)?;
        serde_json::from_str(&content).map_err(|e| StoreError::Malformed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.insert("name".to_owned(), serde_json::Value::from("sett"));
        doc.insert("retries".to_owned(), serde_json::Value::from(3));
        doc.insert("ratio".to_owned(), serde_json::Value::from(2.5));
        doc.insert("token".to_owned(), serde_json::Value::Null);
        doc
    }

    #[test]
    fn test_write_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = JsonStore::new();

        let doc = sample_document();
        store.write(&path, &doc).unwrap();
        let loaded = store.read(&path).unwrap();

        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_key_order_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = JsonStore::new();

        store.write(&path, &sample_document()).unwrap();
        let loaded = store.read(&path).unwrap();

        let keys: Vec<&String> = loaded.keys().collect();
        assert_eq!(keys, ["name", "retries", "ratio", "token"]);
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new();
        let result = store.read(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_read_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonStore::new();
        let result = store.read(&path);
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_read_non_mapping_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = JsonStore::new();
        let result = store.read(&path);
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_write_missing_parent_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("config.json");

        let store = JsonStore::new();
        let result = store.write(&path, &sample_document());
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = JsonStore::new();

        assert!(!store.exists(&path));
        store.write(&path, &sample_document()).unwrap();
        assert!(store.exists(&path));
    }
}
