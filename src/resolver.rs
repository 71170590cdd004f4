//! The shared-registry seam: handle to entity lookup.
//!
//! The mapper never talks to storage directly; it goes through [`Resolver`]
//! so callers decide where entities live. [`SledResolver`] is the on-disk
//! implementation, [`MemoryResolver`] backs tests and embedded use.

use crate::error::MappingResult;
use crate::record::Record;
use crate::value::EntityKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// Resolves registry handles to live entity records.
pub trait Resolver {
    /// Looks up the entity stored under `key`. A miss is not an error.
    fn lookup(&self, key: &EntityKey) -> MappingResult<Option<Record>>;
}

/// In-memory resolver.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    entries: RwLock<HashMap<EntityKey, Record>>,
}

impl MemoryResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under `key`, replacing any previous entry.
    pub fn insert(&self, key: EntityKey, record: Record) {
        self.entries
            .write()
            .expect("resolver lock poisoned")
            .insert(key, record);
    }
}

impl Resolver for MemoryResolver {
    fn lookup(&self, key: &EntityKey) -> MappingResult<Option<Record>> {
        Ok(self
            .entries
            .read()
            .expect("resolver lock poisoned")
            .get(key)
            .cloned())
    }
}

/// Envelope wrapped around stored entities.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntity {
    record: Record,
    stored_at: DateTime<Utc>,
}

/// Resolver backed by a sled database.
///
/// Entities are stored as JSON envelopes under `entity:`-prefixed keys so
/// they are easy to tell apart from other tenants of the same database.
pub struct SledResolver {
    db: sled::Db,
}

impl SledResolver {
    /// Wraps an already-open database.
    #[must_use]
    pub fn new(db: sled::Db) -> Self {
        Self { db }
    }

    /// Opens (or creates) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> MappingResult<Self> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }

    fn storage_key(key: &EntityKey) -> String {
        format!("entity:{}", key.name())
    }

    /// Stores `record` under `key`, durably.
    pub fn insert(&self, key: &EntityKey, record: Record) -> MappingResult<()> {
        let envelope = StoredEntity {
            record,
            stored_at: Utc::now(),
        };
        let bytes = serde_json::to_vec(&envelope)?;
        self.db.insert(Self::storage_key(key).as_bytes(), bytes)?;
        self.db.flush()?;
        Ok(())
    }
}

impl Resolver for SledResolver {
    fn lookup(&self, key: &EntityKey) -> MappingResult<Option<Record>> {
        match self.db.get(Self::storage_key(key).as_bytes())? {
            Some(bytes) => {
                let envelope: StoredEntity = serde_json::from_slice(&bytes)?;
                Ok(Some(envelope.record))
            }
            None => Ok(None),
        }
    }
}
