//! The type registry: startup-populated record and enum metadata.

use crate::descriptor::{EnumDomain, RecordDescriptor, RecordRole};
use crate::error::{MappingError, MappingResult};
use crate::record::Record;
use std::collections::HashMap;

/// Central registry of statically declared record types and enum domains.
///
/// Populated once at startup by each record pair registering its own
/// descriptors; the mapper only reads it. External types are additionally
/// indexed by their impl type and version so an impl record can be wrapped
/// at a requested schema version.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    records: HashMap<String, RecordDescriptor>,
    enums: HashMap<String, EnumDomain>,
    externals_by_impl: HashMap<(String, u32), String>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a record type. Registering the same type name twice is an
    /// error.
    pub fn register_record(&mut self, descriptor: RecordDescriptor) -> MappingResult<()> {
        if self.records.contains_key(&descriptor.type_name) {
            return Err(MappingError::DuplicateRecordType(
                descriptor.type_name.clone(),
            ));
        }
        if let RecordRole::External { version, impl_type } = &descriptor.role {
            self.externals_by_impl
                .insert((impl_type.clone(), *version), descriptor.type_name.clone());
        }
        self.records
            .insert(descriptor.type_name.clone(), descriptor);
        Ok(())
    }

    /// Registers an enum domain. Registering the same domain name twice is
    /// an error.
    pub fn register_enum(&mut self, domain: EnumDomain) -> MappingResult<()> {
        if self.enums.contains_key(&domain.name) {
            return Err(MappingError::DuplicateEnumDomain(domain.name.clone()));
        }
        self.enums.insert(domain.name.clone(), domain);
        Ok(())
    }

    pub fn record(&self, type_name: &str) -> MappingResult<&RecordDescriptor> {
        self.records
            .get(type_name)
            .ok_or_else(|| MappingError::UnknownRecordType(type_name.to_string()))
    }

    pub fn enum_domain(&self, name: &str) -> MappingResult<&EnumDomain> {
        self.enums
            .get(name)
            .ok_or_else(|| MappingError::UnknownEnumDomain(name.to_string()))
    }

    /// The external descriptor wrapping `impl_type` at `version`.
    pub fn external_for(&self, impl_type: &str, version: u32) -> MappingResult<&RecordDescriptor> {
        let type_name = self
            .externals_by_impl
            .get(&(impl_type.to_string(), version))
            .ok_or_else(|| MappingError::NoExternalForVersion {
                impl_type: impl_type.to_string(),
                version,
            })?;
        self.record(type_name)
    }

    /// The impl type paired with the named external type.
    pub fn impl_of(&self, external_name: &str) -> MappingResult<&str> {
        match &self.record(external_name)?.role {
            RecordRole::External { impl_type, .. } => Ok(impl_type),
            RecordRole::Internal => {
                Err(MappingError::NotAnExternalType(external_name.to_string()))
            }
        }
    }

    /// Allocates a fresh record of the named type with every field absent.
    pub fn new_record(&self, type_name: &str) -> MappingResult<Record> {
        let descriptor = self.record(type_name)?;
        Ok(Record::new(descriptor.type_name.clone()))
    }
}
