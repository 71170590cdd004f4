//! The conversion rule table.
//!
//! A closed, first-match dispatch over `(origin value, destination shape)`
//! pairs. The trailing arms are the compiler-enforced default: values that
//! conform to the destination shape copy through directly, everything else
//! is an unsupported conversion and aborts the copy.

use crate::descriptor::FieldShape;
use crate::error::MappingError;
use crate::value::{ColumnSpecifier, CompiledPattern, FieldValue, KeyRef};

use super::property_mapper::PropertyMapper;

/// How a single field conversion failed.
pub(crate) enum ConvertError {
    /// Aborts the whole copy. Fields already copied stay copied.
    Fatal(MappingError),
    /// Logged by the caller; the destination field is left untouched.
    Skip(MappingError),
}

pub(crate) type ConvertResult = Result<FieldValue, ConvertError>;

/// Applies the first matching conversion rule to `value` for a destination
/// slot of shape `shape`.
pub(crate) fn convert_field(
    mapper: &PropertyMapper,
    field_name: &str,
    value: &FieldValue,
    shape: &FieldShape,
) -> ConvertResult {
    use FieldShape as S;
    use FieldValue as V;

    match (value, shape) {
        // An absent origin clears the destination no matter its shape.
        (V::Absent, _) => Ok(V::Absent),

        // Boxed <-> primitive numeric arrays of the same kind. Unboxing
        // requires every element present; a gap falls through to the
        // unsupported-array arm at the bottom.
        (V::BoxedDoubleArray(items), S::DoubleArray) if items.iter().all(Option::is_some) => {
            Ok(V::DoubleArray(items.iter().flatten().copied().collect()))
        }
        (V::DoubleArray(items), S::BoxedDoubleArray) => {
            Ok(V::BoxedDoubleArray(items.iter().copied().map(Some).collect()))
        }
        (V::BoxedIntArray(items), S::IntArray) if items.iter().all(Option::is_some) => {
            Ok(V::IntArray(items.iter().flatten().copied().collect()))
        }
        (V::IntArray(items), S::BoxedIntArray) => {
            Ok(V::BoxedIntArray(items.iter().copied().map(Some).collect()))
        }

        // Record arrays translate element-wise between representations.
        (V::InternalArray(records), S::ExternalArray { type_name })
            if records.iter().all(|r| mapper.impl_of_is(type_name, r)) =>
        {
            let mut translated = Vec::with_capacity(records.len());
            for record in records {
                translated.push(
                    mapper
                        .fill_external(record, type_name)
                        .map_err(classify_translation_error)?,
                );
            }
            Ok(V::ExternalArray(translated))
        }
        (V::ExternalArray(records), S::InternalArray { type_name })
            if records.iter().all(|r| mapper.maps_to_impl(r, type_name)) =>
        {
            let mut translated = Vec::with_capacity(records.len());
            for record in records {
                translated.push(
                    mapper
                        .fill_internal(record)
                        .map_err(classify_translation_error)?,
                );
            }
            Ok(V::InternalArray(translated))
        }

        // Named entity -> raw handle: take the entity's key.
        (V::Internal(record), S::Handle) => match mapper.entity_key_of(record) {
            Some(key) => Ok(V::Handle(key)),
            None => no_rule(field_name, value, shape),
        },

        // Raw handle -> entity: resolve through the shared registry; a miss
        // becomes absent.
        (V::Handle(key), S::Entity) => match mapper.resolve(key) {
            Ok(Some(record)) => Ok(V::Internal(record)),
            Ok(None) => Ok(V::Absent),
            Err(err) => Err(ConvertError::Skip(err)),
        },

        // Named entity -> key wrapper.
        (V::Internal(record), S::KeyRef) => match mapper.entity_key_of(record) {
            Some(key) => Ok(V::KeyRef(KeyRef::from_key(&key))),
            None => no_rule(field_name, value, shape),
        },

        // Key wrapper -> entity: resolve the wrapped name; an absent name
        // resolves to nothing.
        (V::KeyRef(key_ref), S::Entity) => match key_ref.key() {
            Some(key) => match mapper.resolve(&key) {
                Ok(Some(record)) => Ok(V::Internal(record)),
                Ok(None) => Ok(V::Absent),
                Err(err) => Err(ConvertError::Skip(err)),
            },
            None => Ok(V::Absent),
        },

        // Raw handle <-> key wrapper.
        (V::Handle(key), S::KeyRef) => Ok(V::KeyRef(KeyRef::from_key(key))),
        (V::KeyRef(key_ref), S::Handle) => Ok(key_ref.key().map_or(V::Absent, V::Handle)),

        // Text <-> compiled pattern.
        (V::Text(text), S::Pattern) => CompiledPattern::compile(text)
            .map(V::Pattern)
            .map_err(|err| ConvertError::Fatal(MappingError::Pattern(err))),
        (V::Pattern(pattern), S::Text) => Ok(V::Text(pattern.as_str().to_string())),

        // Text <-> column specifier. Only the column name is carried.
        (V::Text(text), S::Column) => Ok(V::Column(ColumnSpecifier::new(text.clone()))),
        (V::Column(column), S::Text) => Ok(V::Text(column.column_name.clone())),

        // Text <-> enum constant.
        (V::Text(text), S::Enum { domain }) => {
            let domain = mapper.enum_domain(domain).map_err(ConvertError::Skip)?;
            if domain.contains(text) {
                Ok(V::EnumValue(text.clone()))
            } else {
                Err(ConvertError::Fatal(MappingError::UnknownEnumConstant {
                    domain: domain.name.clone(),
                    value: text.clone(),
                }))
            }
        }
        (V::EnumValue(constant), S::Text) => Ok(V::Text(constant.clone())),

        // Nested impl -> its external wrapper.
        (V::Internal(record), S::External { type_name })
            if mapper.impl_of_is(type_name, record) =>
        {
            mapper
                .fill_external(record, type_name)
                .map(V::External)
                .map_err(classify_translation_error)
        }

        // Nested external -> its impl.
        (V::External(record), S::Internal { type_name })
            if mapper.maps_to_impl(record, type_name) =>
        {
            mapper
                .fill_internal(record)
                .map(V::Internal)
                .map_err(classify_translation_error)
        }

        // Raw handle -> external wrapper: resolve, then translate when the
        // resolved entity matches the wrapper's impl type.
        (V::Handle(key), S::External { type_name }) => match mapper.resolve(key) {
            Ok(Some(record)) => {
                if mapper.impl_of_is(type_name, &record) {
                    mapper
                        .fill_external(&record, type_name)
                        .map(V::External)
                        .map_err(classify_translation_error)
                } else {
                    log::error!(
                        "cannot fill external record of type '{}' with entity of type '{}' fetched from key '{}'",
                        type_name,
                        record.type_name(),
                        key
                    );
                    Ok(V::Absent)
                }
            }
            Ok(None) => Ok(V::Absent),
            Err(err) => Err(ConvertError::Skip(err)),
        },

        // External wrapper of a named entity -> entity reference, carried
        // as the translated entity's handle.
        (V::External(record), S::Entity) => {
            let translated = mapper
                .fill_internal(record)
                .map_err(classify_translation_error)?;
            match mapper.entity_key_of(&translated) {
                Some(key) => Ok(V::Handle(key)),
                None => no_rule(field_name, value, shape),
            }
        }

        // Default: conforming values copy through; everything else has no
        // rule.
        (value, shape) if shape.admits(value) => Ok(value.clone()),
        (value, shape) => no_rule(field_name, value, shape),
    }
}

/// Failures while allocating a nested record are recoverable; anything else
/// that bubbles out of a nested translation keeps its fatal character.
fn classify_translation_error(err: MappingError) -> ConvertError {
    match err {
        MappingError::UnknownRecordType(_)
        | MappingError::NoExternalForVersion { .. }
        | MappingError::NotAnExternalType(_) => ConvertError::Skip(err),
        other => ConvertError::Fatal(other),
    }
}

fn no_rule(field_name: &str, value: &FieldValue, shape: &FieldShape) -> ConvertResult {
    let err = match (value.element_kind_name(), shape.element_kind_name()) {
        (Some(origin), Some(dest)) => MappingError::ArrayElementMismatch { origin, dest },
        _ => MappingError::NoConversionRule {
            origin: value.kind_name(),
            dest: shape.kind_name(),
            field: field_name.to_string(),
        },
    };
    Err(ConvertError::Fatal(err))
}
