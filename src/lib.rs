//! Schema-aware property mapping between external and internal record
//! representations.
//!
//! Structured data lives in two renditions: versioned, client-facing
//! *external* records and engine-internal *impl* records, some of which are
//! named entities resident in a shared registry and referenced by opaque
//! keys. This crate copies same-named fields between the two renditions,
//! converting representations field by field against a fixed rule table.
//!
//! Record types declare their fields up front in a [`TypeRegistry`]; there
//! is no runtime field discovery. Entity resolution goes through the
//! injected [`Resolver`] so callers decide where entities actually live.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod mapper;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod resolver;
pub mod value;

pub use config::MapperConfig;
pub use descriptor::{
    EnumDomain, FieldDescriptor, FieldPermissions, FieldShape, RecordDescriptor, RecordRole,
};
pub use error::{MappingError, MappingResult};
pub use mapper::{FieldNaming, PropertyMapper};
pub use record::Record;
pub use registry::TypeRegistry;
pub use resolver::{MemoryResolver, Resolver, SledResolver};
pub use value::{ColumnSpecifier, CompiledPattern, EntityKey, FieldValue, KeyRef};
