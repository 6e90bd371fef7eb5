//! Reconciling a section tree with an incoming wire document.

use std::path::PathBuf;

use sett_store::Document;
use tracing::warn;

use super::Section;
use crate::error::{ConfigError, ConfigResult};
use crate::value::{Value, native_kind};

/// What to do with an incoming document key that has no declared
/// counterpart — typically a stale field written by an older schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFieldPolicy {
    /// Drop the key, logging it once per apply.
    #[default]
    Ignore,
    /// Retain the key so the next save writes it back after the declared
    /// fields.
    Preserve,
    /// Fail the load with [`ConfigError::UnknownField`].
    Reject,
}

impl Section {
    /// Assign the values of an incoming document onto the declared fields.
    ///
    /// Only keys *present* in the document overwrite; absent fields keep
    /// their in-memory values — this is what lets a newly-declared field
    /// keep its in-code default when loading an older on-disk document.
    ///
    /// A field holding a nested [`Section`] recurses into the child's
    /// `apply`, refreshing the owned instance's contents without replacing
    /// the instance. A field holding a [`Value::Path`] coerces an incoming
    /// string back into a path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TypeMismatch`] when an incoming value cannot
    /// be reconciled with the declared field kind, and
    /// [`ConfigError::UnknownField`] for an undeclared key under
    /// [`UnknownFieldPolicy::Reject`].
    pub fn apply(&mut self, document: &Document, policy: UnknownFieldPolicy) -> ConfigResult<()> {
        self.apply_at("", document, policy)
    }

    fn apply_at(
        &mut self,
        prefix: &str,
        document: &Document,
        policy: UnknownFieldPolicy,
    ) -> ConfigResult<()> {
        for (key, incoming) in document {
            let path = join_path(prefix, key);
            match self.fields.get_mut(key) {
                Some(slot) => reconcile(slot, incoming, &path, policy)?,
                None => match policy {
                    UnknownFieldPolicy::Ignore => {
                        warn!(field = %path, "ignoring unknown field in document");
                    },
                    UnknownFieldPolicy::Preserve => {
                        self.extras.insert(key.clone(), Value::from_native(incoming));
                    },
                    UnknownFieldPolicy::Reject => {
                        return Err(ConfigError::UnknownField { field: path });
                    },
                },
            }
        }
        Ok(())
    }
}

/// Reconcile one declared slot with its incoming document value. The slot's
/// current kind is the declaration witness: sections recurse, paths coerce
/// from strings, everything else takes the lifted value as-is.
fn reconcile(
    slot: &mut Value,
    incoming: &serde_json::Value,
    field: &str,
    policy: UnknownFieldPolicy,
) -> ConfigResult<()> {
    match slot {
        Value::Section(section) => {
            let serde_json::Value::Object(sub_document) = incoming else {
                return Err(ConfigError::TypeMismatch {
                    field: field.to_owned(),
                    expected: "mapping",
                    found: native_kind(incoming),
                });
            };
            section.apply_at(field, sub_document, policy)
        },
        Value::Path(_) => match incoming {
            serde_json::Value::String(s) => {
                *slot = Value::Path(PathBuf::from(s));
                Ok(())
            },
            serde_json::Value::Null => {
                *slot = Value::Null;
                Ok(())
            },
            other => Err(ConfigError::TypeMismatch {
                field: field.to_owned(),
                expected: "string",
                found: native_kind(other),
            }),
        },
        _ => {
            *slot = Value::from_native(incoming);
            Ok(())
        },
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}
