//! Lowering a section tree to its wire document.

use sett_store::Document;

use super::Section;
use crate::error::ConfigResult;

impl Section {
    /// The native snapshot: a nested wire mapping with paths stringified
    /// and nested sections recursed into mappings, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedValue`](crate::ConfigError::UnsupportedValue)
    /// if a declared value cannot be represented in the wire mapping
    /// (non-finite float).
    pub fn to_document(&self) -> ConfigResult<Document> {
        let mut document = Document::new();
        for (name, value) in &self.fields {
            document.insert(name.clone(), value.to_native(name)?);
        }
        // Stale keys retained under the Preserve policy ride along after
        // the declared fields.
        for (name, value) in &self.extras {
            document.insert(name.clone(), value.to_native(name)?);
        }
        Ok(document)
    }
}
