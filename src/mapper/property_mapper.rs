//! Field-by-field property copying between record instances.

use std::sync::Arc;

use crate::config::{MapperConfig, DEFAULT_SCHEMA_VERSION};
use crate::descriptor::EnumDomain;
use crate::error::MappingResult;
use crate::record::Record;
use crate::registry::TypeRegistry;
use crate::resolver::Resolver;
use crate::value::EntityKey;

use super::convert::{convert_field, ConvertError};
use super::types::FieldNaming;

/// Copies same-named properties between an external ("schema") record and
/// an internal ("impl") record, converting representations field by field.
///
/// The mapper owns no state of its own: record metadata comes from the
/// injected [`TypeRegistry`], entity resolution from the injected
/// [`Resolver`].
pub struct PropertyMapper {
    registry: Arc<TypeRegistry>,
    resolver: Arc<dyn Resolver>,
    default_version: u32,
}

impl PropertyMapper {
    pub fn new(registry: Arc<TypeRegistry>, resolver: Arc<dyn Resolver>) -> Self {
        Self {
            registry,
            resolver,
            default_version: DEFAULT_SCHEMA_VERSION,
        }
    }

    /// Like [`PropertyMapper::new`], taking the default schema version from
    /// `config`.
    pub fn with_config(
        registry: Arc<TypeRegistry>,
        resolver: Arc<dyn Resolver>,
        config: &MapperConfig,
    ) -> Self {
        Self {
            registry,
            resolver,
            default_version: config.default_schema_version,
        }
    }

    /// Copies properties of the same name from `origin` into `dest`.
    pub fn copy_properties(
        &self,
        dest: &mut Record,
        origin: &Record,
        naming: FieldNaming,
    ) -> MappingResult<()> {
        self.copy_properties_skipping(dest, origin, naming, &[])
    }

    /// Copies properties of the same name from `origin` into `dest`,
    /// skipping any field whose origin or destination name appears in
    /// `skip`.
    ///
    /// Origin fields with no same-named destination counterpart are
    /// silently ignored. A field that cannot be read, written, or converted
    /// for a recoverable reason is logged and left untouched; an
    /// unsupported conversion aborts the call, leaving fields copied so far
    /// in place.
    pub fn copy_properties_skipping(
        &self,
        dest: &mut Record,
        origin: &Record,
        naming: FieldNaming,
        skip: &[&str],
    ) -> MappingResult<()> {
        let origin_desc = self.registry.record(origin.type_name())?;
        let dest_desc = self.registry.record(dest.type_name())?;

        for origin_field in &origin_desc.fields {
            if skip.contains(&origin_field.name.as_str()) {
                continue;
            }

            let dest_name = naming.dest_name(&origin_field.name);
            if skip.contains(&dest_name.as_str()) {
                continue;
            }

            let Some(dest_field) = dest_desc.field(&dest_name) else {
                continue;
            };

            if !origin_field.permissions.readable {
                log::error!(
                    "read access denied copying field '{}' of {} to '{}' of {}",
                    origin_field.name,
                    origin_desc.type_name,
                    dest_name,
                    dest_desc.type_name
                );
                continue;
            }
            if !dest_field.permissions.writable {
                log::error!(
                    "write access denied copying field '{}' of {} to '{}' of {}",
                    origin_field.name,
                    origin_desc.type_name,
                    dest_name,
                    dest_desc.type_name
                );
                continue;
            }

            let value = origin.get(&origin_field.name);
            match convert_field(self, &origin_field.name, value, &dest_field.shape) {
                Ok(converted) => dest.set(dest_name, converted),
                Err(ConvertError::Skip(err)) => {
                    log::error!(
                        "failed to copy field '{}' of {} to '{}' of {}: {}",
                        origin_field.name,
                        origin_desc.type_name,
                        dest_name,
                        dest_desc.type_name,
                        err
                    );
                }
                Err(ConvertError::Fatal(err)) => return Err(err),
            }
        }

        Ok(())
    }

    /// Translates an internal record into the named external wrapper type.
    pub fn fill_external(
        &self,
        impl_record: &Record,
        external_type: &str,
    ) -> MappingResult<Record> {
        let mut dest = self.registry.new_record(external_type)?;
        self.copy_properties(&mut dest, impl_record, FieldNaming::OriginHasUnderscores)?;
        Ok(dest)
    }

    /// Translates an internal record into its external wrapper at the
    /// mapper's default schema version.
    pub fn fill_external_latest(&self, impl_record: &Record) -> MappingResult<Record> {
        let external = self
            .registry
            .external_for(impl_record.type_name(), self.default_version)?;
        let type_name = external.type_name.clone();
        self.fill_external(impl_record, &type_name)
    }

    /// Translates an external record into its paired internal type.
    pub fn fill_internal(&self, external_record: &Record) -> MappingResult<Record> {
        let impl_type = self
            .registry
            .impl_of(external_record.type_name())?
            .to_string();
        let mut dest = self.registry.new_record(&impl_type)?;
        self.copy_properties(&mut dest, external_record, FieldNaming::DestHasUnderscores)?;
        Ok(dest)
    }

    pub(crate) fn resolve(&self, key: &EntityKey) -> MappingResult<Option<Record>> {
        self.resolver.lookup(key)
    }

    pub(crate) fn enum_domain(&self, name: &str) -> MappingResult<&EnumDomain> {
        self.registry.enum_domain(name)
    }

    /// The entity key of a record, when its type declares one.
    pub(crate) fn entity_key_of(&self, record: &Record) -> Option<EntityKey> {
        let descriptor = self.registry.record(record.type_name()).ok()?;
        record.entity_key(descriptor)
    }

    /// Whether `record` is the impl type paired with `external_type`.
    pub(crate) fn impl_of_is(&self, external_type: &str, record: &Record) -> bool {
        matches!(
            self.registry.impl_of(external_type),
            Ok(impl_type) if impl_type == record.type_name()
        )
    }

    /// Whether `record` is an external type pairing with `impl_type`.
    pub(crate) fn maps_to_impl(&self, record: &Record, impl_type: &str) -> bool {
        matches!(
            self.registry.impl_of(record.type_name()),
            Ok(found) if found == impl_type
        )
    }
}
