//! Static field metadata.
//!
//! Record types declare their fields once, up front, as a
//! [`RecordDescriptor`]; the mapper never discovers fields at runtime.
//! Destination slots are described by a [`FieldShape`], which also defines
//! shape conformance for the direct-assignment case.

use crate::value::FieldValue;
use serde::{Deserialize, Serialize};

/// What a record field is declared to hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum FieldShape {
    Bool,
    Int,
    Double,
    Text,
    IntArray,
    BoxedIntArray,
    DoubleArray,
    BoxedDoubleArray,
    Pattern,
    Column,
    Enum { domain: String },
    Handle,
    KeyRef,
    /// A reference to a keyed, registry-resident internal record.
    Entity,
    External { type_name: String },
    Internal { type_name: String },
    ExternalArray { type_name: String },
    InternalArray { type_name: String },
}

impl FieldShape {
    /// Shape conformance for direct assignment.
    ///
    /// `Absent` conforms to every shape. `Entity` admits keyed internal
    /// records as well as raw handles, matching how entity references are
    /// carried on the internal side.
    #[must_use]
    pub fn admits(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (_, FieldValue::Absent) => true,
            (FieldShape::Bool, FieldValue::Bool(_)) => true,
            (FieldShape::Int, FieldValue::Int(_)) => true,
            (FieldShape::Double, FieldValue::Double(_)) => true,
            (FieldShape::Text, FieldValue::Text(_)) => true,
            (FieldShape::IntArray, FieldValue::IntArray(_)) => true,
            (FieldShape::BoxedIntArray, FieldValue::BoxedIntArray(_)) => true,
            (FieldShape::DoubleArray, FieldValue::DoubleArray(_)) => true,
            (FieldShape::BoxedDoubleArray, FieldValue::BoxedDoubleArray(_)) => true,
            (FieldShape::Pattern, FieldValue::Pattern(_)) => true,
            (FieldShape::Column, FieldValue::Column(_)) => true,
            (FieldShape::Enum { .. }, FieldValue::EnumValue(_)) => true,
            (FieldShape::Handle, FieldValue::Handle(_)) => true,
            (FieldShape::KeyRef, FieldValue::KeyRef(_)) => true,
            (FieldShape::Entity, FieldValue::Internal(_) | FieldValue::Handle(_)) => true,
            (FieldShape::External { type_name }, FieldValue::External(record)) => {
                record.type_name() == type_name
            }
            (FieldShape::Internal { type_name }, FieldValue::Internal(record)) => {
                record.type_name() == type_name
            }
            (FieldShape::ExternalArray { type_name }, FieldValue::ExternalArray(records)) => {
                records.iter().all(|r| r.type_name() == type_name)
            }
            (FieldShape::InternalArray { type_name }, FieldValue::InternalArray(records)) => {
                records.iter().all(|r| r.type_name() == type_name)
            }
            _ => false,
        }
    }

    /// Short name used in error reports.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldShape::Bool => "bool",
            FieldShape::Int => "int",
            FieldShape::Double => "double",
            FieldShape::Text => "text",
            FieldShape::IntArray => "int[]",
            FieldShape::BoxedIntArray => "boxed int[]",
            FieldShape::DoubleArray => "double[]",
            FieldShape::BoxedDoubleArray => "boxed double[]",
            FieldShape::Pattern => "pattern",
            FieldShape::Column => "column specifier",
            FieldShape::Enum { .. } => "enum",
            FieldShape::Handle => "handle",
            FieldShape::KeyRef => "key ref",
            FieldShape::Entity => "entity",
            FieldShape::External { .. } => "external record",
            FieldShape::Internal { .. } => "internal record",
            FieldShape::ExternalArray { .. } => "external record[]",
            FieldShape::InternalArray { .. } => "internal record[]",
        }
    }

    /// The element kind of array shapes, used when reporting unsupported
    /// array pairings.
    #[must_use]
    pub fn element_kind_name(&self) -> Option<&'static str> {
        match self {
            FieldShape::IntArray => Some("int"),
            FieldShape::BoxedIntArray => Some("boxed int"),
            FieldShape::DoubleArray => Some("double"),
            FieldShape::BoxedDoubleArray => Some("boxed double"),
            FieldShape::ExternalArray { .. } => Some("external record"),
            FieldShape::InternalArray { .. } => Some("internal record"),
            _ => None,
        }
    }
}

/// Read/write access declared per field.
///
/// The mapper honors these when reading origin fields and writing
/// destination fields; a denied side is logged and the field is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPermissions {
    pub readable: bool,
    pub writable: bool,
}

impl Default for FieldPermissions {
    fn default() -> Self {
        Self {
            readable: true,
            writable: true,
        }
    }
}

impl FieldPermissions {
    #[must_use]
    pub const fn read_write() -> Self {
        Self {
            readable: true,
            writable: true,
        }
    }

    #[must_use]
    pub const fn read_only() -> Self {
        Self {
            readable: true,
            writable: false,
        }
    }

    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            readable: false,
            writable: false,
        }
    }
}

/// One declared field of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub shape: FieldShape,
    #[serde(default)]
    pub permissions: FieldPermissions,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, shape: FieldShape) -> Self {
        Self {
            name: name.into(),
            shape,
            permissions: FieldPermissions::default(),
        }
    }

    #[must_use]
    pub fn with_permissions(mut self, permissions: FieldPermissions) -> Self {
        self.permissions = permissions;
        self
    }
}

/// Which side of the external/internal split a record type lives on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RecordRole {
    /// Versioned, client-facing wrapper around the named impl type.
    External { version: u32, impl_type: String },
    Internal,
}

/// A named set of enum constants shared between record types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDomain {
    pub name: String,
    pub constants: Vec<String>,
}

impl EnumDomain {
    pub fn new(name: impl Into<String>, constants: Vec<&str>) -> Self {
        Self {
            name: name.into(),
            constants: constants.into_iter().map(str::to_string).collect(),
        }
    }

    /// Exact-match parse against the declared constants.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<&str> {
        self.constants
            .iter()
            .find(|c| c.as_str() == text)
            .map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.parse(text).is_some()
    }
}

/// The statically declared field set of one record type.
///
/// Field declaration order is preserved and drives mapping iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    pub type_name: String,
    pub role: RecordRole,
    /// Internal entity types name the `Handle`-shaped field carrying their
    /// registry key.
    pub key_field: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Creates a descriptor for an internal record type.
    pub fn new_internal(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            role: RecordRole::Internal,
            key_field: None,
            fields: Vec::new(),
        }
    }

    /// Creates a descriptor for an external wrapper around `impl_type`.
    pub fn new_external(
        type_name: impl Into<String>,
        version: u32,
        impl_type: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            role: RecordRole::External {
                version,
                impl_type: impl_type.into(),
            },
            key_field: None,
            fields: Vec::new(),
        }
    }

    /// Marks this type as a named entity whose key lives in `name`.
    #[must_use]
    pub fn with_key_field(mut self, name: impl Into<String>) -> Self {
        self.key_field = Some(name.into());
        self
    }

    /// Appends a field declaration.
    pub fn add_field(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    /// Chainable variant of [`RecordDescriptor::add_field`].
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, shape: FieldShape) -> Self {
        self.add_field(FieldDescriptor::new(name, shape));
        self
    }

    /// Finds a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The schema version of an external type.
    #[must_use]
    pub fn version(&self) -> Option<u32> {
        match &self.role {
            RecordRole::External { version, .. } => Some(*version),
            RecordRole::Internal => None,
        }
    }

    /// The paired impl type of an external type.
    #[must_use]
    pub fn impl_type(&self) -> Option<&str> {
        match &self.role {
            RecordRole::External { impl_type, .. } => Some(impl_type),
            RecordRole::Internal => None,
        }
    }
}
