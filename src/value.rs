//! The closed value model for record fields.
//!
//! Every representational shape the mapper understands is one variant of
//! [`FieldValue`]. The conversion rule table dispatches over these variants
//! paired with the destination's declared shape; there is no open-ended
//! type inspection anywhere in the crate.

use crate::record::Record;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a named entity in the shared registry.
///
/// Keys are the unit of reference between records: internal records hold
/// them directly, external records carry them wrapped in a [`KeyRef`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    /// Creates a key from an existing name.
    pub fn make(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Generates a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The key's name, used verbatim as the registry lookup key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External wrapper around an entity key.
///
/// The schema-side rendition of a registry handle: carries only the key's
/// name, which may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRef {
    pub name: Option<String>,
}

impl KeyRef {
    /// Wraps an entity key.
    #[must_use]
    pub fn from_key(key: &EntityKey) -> Self {
        Self {
            name: Some(key.name().to_string()),
        }
    }

    /// The wrapped key, absent when no name is set.
    #[must_use]
    pub fn key(&self) -> Option<EntityKey> {
        self.name.clone().map(EntityKey::make)
    }
}

/// Names a column. Only the column name is carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpecifier {
    pub column_name: String,
}

impl ColumnSpecifier {
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
        }
    }
}

/// A compiled regular expression that remembers its source text.
///
/// Equality and serialization are defined over the source text, so patterns
/// survive persistence through the entity store unchanged.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compiles `source` into a pattern.
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: Regex::new(source)?,
        })
    }

    /// The original pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Serialize for CompiledPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for CompiledPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::compile(&source).map_err(serde::de::Error::custom)
    }
}

/// A field value: one variant per representational shape the mapper knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Absent,
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
    IntArray(Vec<i64>),
    BoxedIntArray(Vec<Option<i64>>),
    DoubleArray(Vec<f64>),
    BoxedDoubleArray(Vec<Option<f64>>),
    Pattern(CompiledPattern),
    Column(ColumnSpecifier),
    EnumValue(String),
    Handle(EntityKey),
    KeyRef(KeyRef),
    External(Record),
    Internal(Record),
    ExternalArray(Vec<Record>),
    InternalArray(Vec<Record>),
}

impl FieldValue {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Short name used in error reports.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Absent => "absent",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Double(_) => "double",
            FieldValue::Text(_) => "text",
            FieldValue::IntArray(_) => "int[]",
            FieldValue::BoxedIntArray(_) => "boxed int[]",
            FieldValue::DoubleArray(_) => "double[]",
            FieldValue::BoxedDoubleArray(_) => "boxed double[]",
            FieldValue::Pattern(_) => "pattern",
            FieldValue::Column(_) => "column specifier",
            FieldValue::EnumValue(_) => "enum",
            FieldValue::Handle(_) => "handle",
            FieldValue::KeyRef(_) => "key ref",
            FieldValue::External(_) => "external record",
            FieldValue::Internal(_) => "internal record",
            FieldValue::ExternalArray(_) => "external record[]",
            FieldValue::InternalArray(_) => "internal record[]",
        }
    }

    /// The element kind of array values, used when reporting unsupported
    /// array pairings.
    #[must_use]
    pub fn element_kind_name(&self) -> Option<&'static str> {
        match self {
            FieldValue::IntArray(_) => Some("int"),
            FieldValue::BoxedIntArray(_) => Some("boxed int"),
            FieldValue::DoubleArray(_) => Some("double"),
            FieldValue::BoxedDoubleArray(_) => Some("boxed double"),
            FieldValue::ExternalArray(_) => Some("external record"),
            FieldValue::InternalArray(_) => Some("internal record"),
            _ => None,
        }
    }
}
