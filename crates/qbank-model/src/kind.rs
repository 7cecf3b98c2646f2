use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Interaction type of a question.
///
/// The serialized names match the `type` field of the question-set file
/// format consumed by the quiz-taking application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Exactly one option is correct.
    #[serde(rename = "single")]
    SingleChoice,
    /// Any subset of the options is correct.
    #[serde(rename = "multi-select")]
    MultiSelect,
    /// A single free-text answer; no options.
    #[serde(rename = "fill-in")]
    FillIn,
    /// The options must be arranged into a correct sequence.
    #[serde(rename = "ordering")]
    Ordering,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::SingleChoice,
        QuestionKind::MultiSelect,
        QuestionKind::FillIn,
        QuestionKind::Ordering,
    ];

    /// The wire name as it appears in question-set files.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "single",
            QuestionKind::MultiSelect => "multi-select",
            QuestionKind::FillIn => "fill-in",
            QuestionKind::Ordering => "ordering",
        }
    }

    /// Returns true if records of this kind carry an options list.
    pub fn has_options(&self) -> bool {
        !matches!(self, QuestionKind::FillIn)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = ModelError;

    /// Parse a wire `type` string (case-insensitive, surrounding
    /// whitespace tolerated).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(QuestionKind::SingleChoice),
            "multi-select" => Ok(QuestionKind::MultiSelect),
            "fill-in" => Ok(QuestionKind::FillIn),
            "ordering" => Ok(QuestionKind::Ordering),
            _ => Err(ModelError::UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for kind in QuestionKind::ALL {
            assert_eq!(kind.as_str().parse::<QuestionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn parse_tolerates_case_and_whitespace() {
        assert_eq!(
            " Multi-Select ".parse::<QuestionKind>().unwrap(),
            QuestionKind::MultiSelect
        );
        assert!("essay".parse::<QuestionKind>().is_err());
    }

    #[test]
    fn only_fill_in_lacks_options() {
        assert!(!QuestionKind::FillIn.has_options());
        assert!(QuestionKind::Ordering.has_options());
    }
}
