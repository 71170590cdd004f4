use serde::{Deserialize, Serialize};

/// How origin field names map onto destination field names.
///
/// The prefix marker is a single leading underscore, the convention internal
/// record types use for their fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNaming {
    /// Both sides use the same names.
    Consistent,
    /// Destination names carry the underscore prefix the origin lacks.
    DestHasUnderscores,
    /// Origin names carry an underscore prefix the destination strips.
    OriginHasUnderscores,
}

impl FieldNaming {
    /// The destination field name for an origin field name under this
    /// policy.
    #[must_use]
    pub fn dest_name(&self, origin_name: &str) -> String {
        match self {
            FieldNaming::Consistent => origin_name.to_string(),
            FieldNaming::DestHasUnderscores => format!("_{}", origin_name),
            FieldNaming::OriginHasUnderscores => origin_name
                .strip_prefix('_')
                .unwrap_or(origin_name)
                .to_string(),
        }
    }
}
