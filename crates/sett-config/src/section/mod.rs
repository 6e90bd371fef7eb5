//! Config sections — named, ordered groups of declared fields.
//!
//! A [`Section`] is a self-describing node in the configuration tree: an
//! ordered mapping from field name to current [`Value`], built up through
//! explicit declarations. The schema is closed — values change through
//! [`Section::set`] or reconciliation, names only through declaration.
//!
//! Reconciliation operates on raw [`Document`](sett_store::Document) trees
//! rather than deserialized structs. This correctly handles "absent vs
//! default" — a key missing from the incoming document never overrides the
//! in-memory value.

mod apply;
mod convert;


pub use apply::UnknownFieldPolicy;

use crate::error::{ConfigError, ConfigResult};
use crate::value::{FieldMap, Value};

/// A named, serializable group of declared fields, possibly nested inside
/// another section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Key under which this section nests inside its parent's document.
    name: String,
    /// Declared fields, in declaration order.
    fields: FieldMap,
    /// Undeclared on-disk fields retained under
    /// [`UnknownFieldPolicy::Preserve`].
    extras: FieldMap,
}

impl Section {
    /// Create an empty section with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: FieldMap::new(),
            extras: FieldMap::new(),
        }
    }

    /// The section's identity inside a parent mapping.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a field with its default value.
    ///
    /// Declaration order is serialization order. Redeclaring an existing
    /// name replaces the default in place, keeping the original position.
    pub fn declare(&mut self, name: impl Into<String>, default: impl Into<Value>) -> &mut Self {
        self.fields.insert(name.into(), default.into());
        self
    }

    /// Declare a nested section field, keyed by the child's own name.
    pub fn declare_section(&mut self, section: Section) -> &mut Self {
        let key = section.name().to_owned();
        self.fields.insert(key, Value::Section(section));
        self
    }

    /// Current value of a declared field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Mutable access to a declared field's value.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Overwrite a declared field's value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownField`] if no field of that name has
    /// been declared — the schema grows only through declarations.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> ConfigResult<()> {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            },
            None => Err(ConfigError::UnknownField {
                field: name.to_owned(),
            }),
        }
    }

    /// A nested section field, if one of that name is declared.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.fields.get(name).and_then(Value::as_section)
    }

    /// Mutable access to a nested section field.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.fields.get_mut(name).and_then(Value::as_section_mut)
    }

    /// Declared field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The live snapshot: a clone of the declared field map with `Section`
    /// and `Path` values intact, for structural comparison.
    ///
    /// Retained unknown fields are not part of the snapshot — they are not
    /// declared state, they only ride along at serialization time.
    #[must_use]
    pub fn snapshot(&self) -> FieldMap {
        self.fields.clone()
    }
}
