use serde::{Deserialize, Serialize};

/// Placeholder value some source files use for unset metadata fields.
pub const UNKNOWN_METADATA: &str = "Unknown";

/// Set-level metadata. Subject and grade are required for a set to be
/// exportable; the set name is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMetadata {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade: String,
    #[serde(rename = "setName", default)]
    pub set_name: String,
}

impl SetMetadata {
    /// True when any field carries a non-empty value.
    pub fn is_populated(&self) -> bool {
        !self.subject.trim().is_empty()
            || !self.grade.trim().is_empty()
            || !self.set_name.trim().is_empty()
    }
}
