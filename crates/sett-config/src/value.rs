//! The tagged value model.
//!
//! Every kind a configuration field can hold, as one exhaustive enum. The
//! reconciliation and serialization algorithms match over [`Value`], so an
//! unhandled kind is a compile error rather than a runtime failure.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{ConfigError, ConfigResult};
use crate::section::Section;

/// An ordered mapping from field name to value. Insertion order is
/// declaration order and survives serialization.
pub type FieldMap = IndexMap<String, Value>;

/// A configuration field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The null sentinel. A valid default, distinct from "field absent".
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number. `Int` and `Float` are distinct kinds and
    /// never silently cross.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence of values.
    Seq(Vec<Value>),
    /// An ordered mapping with string keys.
    Map(FieldMap),
    /// A filesystem path. Serialized as its string form; the declaration
    /// drives coercion back from strings on load.
    Path(PathBuf),
    /// A nested section, keyed in the parent document by its own name.
    Section(Section),
}

impl Value {
    /// Kind name used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "mapping",
            Self::Path(_) => "path",
            Self::Section(_) => "section",
        }
    }

    /// Whether this value is the null sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The contained boolean, if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The contained integer, if this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The contained float, if this is a `Float`.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The contained string, if this is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The contained sequence, if this is a `Seq`.
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// The contained mapping, if this is a `Map`.
    #[must_use]
    pub fn as_map(&self) -> Option<&FieldMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The contained path, if this is a `Path`.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }

    /// The contained section, if this is a `Section`.
    #[must_use]
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Self::Section(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable access to the contained section, if this is a `Section`.
    pub fn as_section_mut(&mut self) -> Option<&mut Section> {
        match self {
            Self::Section(s) => Some(s),
            _ => None,
        }
    }

    /// Lift a wire value into the engine model.
    ///
    /// Objects become `Map`, never `Section` — section identity comes only
    /// from declarations, not from document shape.
    #[must_use]
    pub fn from_native(native: &serde_json::Value) -> Self {
        match native {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Self::Int(i),
                // u64 beyond i64 range degrades to float.
                (None, Some(f)) => Self::Float(f),
                (None, None) => Self::Null,
            },
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Self::Seq(items.iter().map(Self::from_native).collect())
            },
            serde_json::Value::Object(map) => Self::Map(
                map.iter()
                    .map(|(key, val)| (key.clone(), Self::from_native(val)))
                    .collect(),
            ),
        }
    }

    /// Lower this value to the wire model: paths become their string form,
    /// sections become nested mappings, everything else maps structurally.
    ///
    /// `field` is the dotted path used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedValue`] for a non-finite float —
    /// the one kind the wire mapping cannot represent.
    pub fn to_native(&self, field: &str) -> ConfigResult<serde_json::Value> {
        match self {
            Self::Null => Ok(serde_json::Value::Null),
            Self::Bool(b) => Ok(serde_json::Value::from(*b)),
            Self::Int(i) => Ok(serde_json::Value::from(*i)),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| ConfigError::UnsupportedValue {
                    field: field.to_owned(),
                    message: format!("non-finite float {f} cannot be serialized"),
                }),
            Self::Str(s) => Ok(serde_json::Value::from(s.clone())),
            Self::Path(p) => Ok(serde_json::Value::from(p.to_string_lossy().into_owned())),
            Self::Seq(items) => items
                .iter()
                .map(|item| item.to_native(field))
                .collect::<ConfigResult<Vec<_>>>()
                .map(serde_json::Value::Array),
            Self::Map(map) => {
                let mut object = sett_store::Document::new();
                for (key, val) in map {
                    object.insert(key.clone(), val.to_native(&format!("{field}.{key}"))?);
                }
                Ok(serde_json::Value::Object(object))
            },
            Self::Section(section) => section.to_document().map(serde_json::Value::Object),
        }
    }
}

/// Kind name of a wire value, used in error messages.
#[must_use]
pub fn native_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(n) if n.is_f64() => "float",
        serde_json::Value::Number(_) => "int",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<PathBuf> for Value {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&Path> for Value {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

impl From<Section> for Value {
    fn from(section: Section) -> Self {
        Self::Section(section)
    }
}

impl From<FieldMap> for Value {
    fn from(map: FieldMap) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Seq(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(key, val)| (key.into(), val.into()))
                .collect(),
        )
    }
}
