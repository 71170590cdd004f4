//! Unified error handling for mapping, registry, and resolver operations.

use thiserror::Error;

/// Result type alias for mapping operations
pub type MappingResult<T> = Result<T, MappingError>;

/// Errors produced while mapping records or talking to the entity store.
#[derive(Error, Debug)]
pub enum MappingError {
    /// No conversion rule covers the origin value and destination shape.
    #[error("no conversion rule from {origin} to {dest} for field '{field}'")]
    NoConversionRule {
        origin: &'static str,
        dest: &'static str,
        field: String,
    },

    /// Array element types with no conversion rule between them.
    #[error("cannot convert an array of {origin} to an array of {dest}")]
    ArrayElementMismatch {
        origin: &'static str,
        dest: &'static str,
    },

    /// Text did not match any constant of the destination enum domain.
    #[error("unknown enum constant '{value}' in domain '{domain}'")]
    UnknownEnumConstant { domain: String, value: String },

    #[error("unknown enum domain: {0}")]
    UnknownEnumDomain(String),

    #[error("unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("record type '{0}' is already registered")]
    DuplicateRecordType(String),

    #[error("enum domain '{0}' is already registered")]
    DuplicateEnumDomain(String),

    /// No external wrapper registered for the impl type at the requested version.
    #[error("no external record type registered for impl type '{impl_type}' at version {version}")]
    NoExternalForVersion { impl_type: String, version: u32 },

    /// An external-only operation was attempted on an internal type.
    #[error("record type '{0}' has no impl counterpart")]
    NotAnExternalType(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
