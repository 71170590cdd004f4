//! Record instances.
//!
//! A [`Record`] is a dumb typed field container: it knows its type name and
//! holds values, nothing else. Shape and permission checking happen in the
//! mapper against the registry's descriptors, so records stay cheap to
//! build, clone, and persist.

use crate::descriptor::RecordDescriptor;
use crate::value::{EntityKey, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A structured record instance. Unset fields read as `Absent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    type_name: String,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Reads a field. Fields never set read as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &FieldValue {
        self.fields.get(name).unwrap_or(&FieldValue::Absent)
    }

    /// Sets a field value, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Chainable variant of [`Record::set`].
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.set(name, value);
        self
    }

    /// The registry key of a named entity, read through the descriptor's
    /// declared key field.
    #[must_use]
    pub fn entity_key(&self, descriptor: &RecordDescriptor) -> Option<EntityKey> {
        let key_field = descriptor.key_field.as_deref()?;
        match self.get(key_field) {
            FieldValue::Handle(key) => Some(key.clone()),
            _ => None,
        }
    }
}
