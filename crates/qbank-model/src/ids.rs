use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Opaque stable identifier for a question record.
///
/// IDs are assigned by the store's allocator and rendered as `q_<n>`.
/// Externally supplied IDs (from imported files) are accepted as opaque
/// strings but are never trusted for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::InvalidQuestionId(value));
        }
        Ok(Self(value))
    }

    /// Build the canonical allocator-issued form for a counter value.
    pub fn from_counter(counter: u64) -> Self {
        Self(format!("q_{counter}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the trailing decimal digit run of the ID, if any.
    ///
    /// `q_12` and `item12` both yield 12; `intro` yields None. Used to
    /// re-seed the allocator from externally supplied IDs so freshly
    /// allocated IDs never collide with them.
    pub fn numeric_suffix(&self) -> Option<u64> {
        let digits: String = self
            .0
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_ids() {
        assert!(QuestionId::new("  ").is_err());
        assert!(QuestionId::new("q_1").is_ok());
    }

    #[test]
    fn numeric_suffix_parses_trailing_digits() {
        assert_eq!(QuestionId::from_counter(12).numeric_suffix(), Some(12));
        assert_eq!(QuestionId::new("item007").unwrap().numeric_suffix(), Some(7));
        assert_eq!(QuestionId::new("intro").unwrap().numeric_suffix(), None);
        assert_eq!(QuestionId::new("q_5_a").unwrap().numeric_suffix(), None);
    }
}
