//! Configuration for embedders wiring the mapper to on-disk storage.

use crate::error::{MappingError, MappingResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Latest external schema version, used when a caller does not pick one.
pub const DEFAULT_SCHEMA_VERSION: u32 = 3;

/// Configuration for a mapper-backed service instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Path where the entity store keeps its data
    pub storage_path: PathBuf,
    /// External schema version used for fills that do not name one
    #[serde(default = "default_schema_version")]
    pub default_schema_version: u32,
}

fn default_schema_version() -> u32 {
    DEFAULT_SCHEMA_VERSION
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("data"),
            default_schema_version: DEFAULT_SCHEMA_VERSION,
        }
    }
}

impl MapperConfig {
    /// Creates a configuration with the specified storage path.
    pub fn new(storage_path: PathBuf) -> Self {
        Self {
            storage_path,
            ..Default::default()
        }
    }

    /// Loads and validates configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> MappingResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            MappingError::Configuration(format!("failed to read config file: {}", e))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> MappingResult<()> {
        if self.storage_path.as_os_str().is_empty() {
            return Err(MappingError::Configuration(
                "storage_path must not be empty".to_string(),
            ));
        }
        if self.default_schema_version == 0 {
            return Err(MappingError::Configuration(
                "default_schema_version must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
