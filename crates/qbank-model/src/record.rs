use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::QuestionId;
use crate::kind::QuestionKind;

/// Hint strings the original content treats as "no hint".
///
/// Compared case-insensitively after trimming.
pub const HINT_PLACEHOLDERS: [&str; 2] = ["no hint available.", "no hint."];

/// Returns true when a hint string carries no real hint.
pub fn hint_is_placeholder(hint: &str) -> bool {
    let trimmed = hint.trim();
    trimmed.is_empty()
        || HINT_PLACEHOLDERS
            .iter()
            .any(|placeholder| trimmed.eq_ignore_ascii_case(placeholder))
}

/// Kind-specific payload of a question: its options (where the kind has
/// any) and its answer, shaped to the kind.
///
/// Keeping options and answer inside the kind variant makes illegal
/// combinations (a fill-in with an options list, a single-choice with an
/// answer sequence) unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionBody {
    /// One option is correct; `answer` holds its text when selected.
    SingleChoice {
        options: Vec<String>,
        answer: Option<String>,
    },
    /// A set of options is correct.
    MultiSelect {
        options: Vec<String>,
        answer: BTreeSet<String>,
    },
    /// The options in their correct sequence.
    Ordering {
        options: Vec<String>,
        answer: Vec<String>,
    },
    /// A single free-text answer.
    FillIn { answer: String },
}

impl QuestionBody {
    /// An empty body for a freshly created question of the given kind.
    pub fn empty(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::SingleChoice => QuestionBody::SingleChoice {
                options: Vec::new(),
                answer: None,
            },
            QuestionKind::MultiSelect => QuestionBody::MultiSelect {
                options: Vec::new(),
                answer: BTreeSet::new(),
            },
            QuestionKind::Ordering => QuestionBody::Ordering {
                options: Vec::new(),
                answer: Vec::new(),
            },
            QuestionKind::FillIn => QuestionBody::FillIn {
                answer: String::new(),
            },
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionBody::SingleChoice { .. } => QuestionKind::SingleChoice,
            QuestionBody::MultiSelect { .. } => QuestionKind::MultiSelect,
            QuestionBody::Ordering { .. } => QuestionKind::Ordering,
            QuestionBody::FillIn { .. } => QuestionKind::FillIn,
        }
    }

    /// The options list, when the kind carries one.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            QuestionBody::SingleChoice { options, .. }
            | QuestionBody::MultiSelect { options, .. }
            | QuestionBody::Ordering { options, .. } => Some(options),
            QuestionBody::FillIn { .. } => None,
        }
    }

    /// Replace the options list and repair the answer so it never
    /// references a value no longer present.
    ///
    /// No-op for fill-in bodies.
    pub fn set_options(&mut self, new_options: Vec<String>) {
        match self {
            QuestionBody::SingleChoice { options, .. }
            | QuestionBody::MultiSelect { options, .. }
            | QuestionBody::Ordering { options, .. } => *options = new_options,
            QuestionBody::FillIn { .. } => return,
        }
        self.repair_answer();
    }

    /// Drop answer references to values missing from `options`.
    ///
    /// Invoked after every options mutation so the answer never dangles.
    /// Imported data is left as-is until edited; the validator and the
    /// preview both tolerate (and flag) dangling imported references.
    pub fn repair_answer(&mut self) {
        match self {
            QuestionBody::SingleChoice { options, answer } => {
                if let Some(value) = answer
                    && !options.contains(value)
                {
                    *answer = None;
                }
            }
            QuestionBody::MultiSelect { options, answer } => {
                answer.retain(|value| options.contains(value));
            }
            QuestionBody::Ordering { options, answer } => {
                answer.retain(|value| options.contains(value));
            }
            QuestionBody::FillIn { .. } => {}
        }
    }

    /// Migrate this body to another kind, preserving what carries over.
    ///
    /// The options list survives between option-bearing kinds; the answer
    /// survives between single-choice and multi-select (both reference
    /// option text) and is reset otherwise.
    pub fn convert_to(&self, kind: QuestionKind) -> QuestionBody {
        if self.kind() == kind {
            return self.clone();
        }
        let options = self.options().map(<[String]>::to_vec).unwrap_or_default();
        match (self, kind) {
            (QuestionBody::SingleChoice { answer, .. }, QuestionKind::MultiSelect) => {
                QuestionBody::MultiSelect {
                    options,
                    answer: answer.iter().cloned().collect(),
                }
            }
            (QuestionBody::MultiSelect { answer, .. }, QuestionKind::SingleChoice) => {
                QuestionBody::SingleChoice {
                    options,
                    answer: answer.iter().next().cloned(),
                }
            }
            (_, QuestionKind::SingleChoice) => QuestionBody::SingleChoice {
                options,
                answer: None,
            },
            (_, QuestionKind::MultiSelect) => QuestionBody::MultiSelect {
                options,
                answer: BTreeSet::new(),
            },
            (_, QuestionKind::Ordering) => QuestionBody::Ordering {
                options,
                answer: Vec::new(),
            },
            (_, QuestionKind::FillIn) => QuestionBody::FillIn {
                answer: String::new(),
            },
        }
    }
}

/// One quiz question: the canonical unit every projection (form fragment,
/// validation report, preview) is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub prompt: String,
    pub body: QuestionBody,
    pub rationale: String,
    pub hint: String,
}

impl QuestionRecord {
    /// A fresh empty record. New questions default to single choice.
    pub fn new(id: QuestionId) -> Self {
        Self::with_kind(id, QuestionKind::SingleChoice)
    }

    pub fn with_kind(id: QuestionId, kind: QuestionKind) -> Self {
        Self {
            id,
            prompt: String::new(),
            body: QuestionBody::empty(kind),
            rationale: String::new(),
            hint: String::new(),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        self.body.kind()
    }

    /// The hint, unless it is empty or a "no hint" placeholder phrase.
    pub fn effective_hint(&self) -> Option<&str> {
        let trimmed = self.hint.trim();
        if hint_is_placeholder(trimmed) {
            None
        } else {
            Some(trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> QuestionId {
        QuestionId::new(value).unwrap()
    }

    #[test]
    fn placeholder_hints_are_absent() {
        let mut record = QuestionRecord::new(id("q_1"));
        record.hint = "No Hint Available.".to_string();
        assert_eq!(record.effective_hint(), None);
        record.hint = "  no hint.  ".to_string();
        assert_eq!(record.effective_hint(), None);
        record.hint = "Think of planets.".to_string();
        assert_eq!(record.effective_hint(), Some("Think of planets."));
    }

    #[test]
    fn set_options_repairs_single_choice_answer() {
        let mut body = QuestionBody::SingleChoice {
            options: vec!["A".into(), "B".into()],
            answer: Some("B".into()),
        };
        body.set_options(vec!["A".into()]);
        assert_eq!(
            body,
            QuestionBody::SingleChoice {
                options: vec!["A".into()],
                answer: None,
            }
        );
    }

    #[test]
    fn set_options_repairs_ordering_answer() {
        let mut body = QuestionBody::Ordering {
            options: vec!["A".into(), "B".into(), "C".into()],
            answer: vec!["C".into(), "A".into(), "B".into()],
        };
        body.set_options(vec!["A".into(), "C".into()]);
        assert_eq!(
            body,
            QuestionBody::Ordering {
                options: vec!["A".into(), "C".into()],
                answer: vec!["C".into(), "A".into()],
            }
        );
    }

    #[test]
    fn convert_preserves_options_and_compatible_answers() {
        let single = QuestionBody::SingleChoice {
            options: vec!["A".into(), "B".into()],
            answer: Some("A".into()),
        };
        let multi = single.convert_to(QuestionKind::MultiSelect);
        assert_eq!(
            multi,
            QuestionBody::MultiSelect {
                options: vec!["A".into(), "B".into()],
                answer: ["A".to_string()].into_iter().collect(),
            }
        );
        let ordering = multi.convert_to(QuestionKind::Ordering);
        assert_eq!(
            ordering,
            QuestionBody::Ordering {
                options: vec!["A".into(), "B".into()],
                answer: Vec::new(),
            }
        );
        let fill_in = ordering.convert_to(QuestionKind::FillIn);
        assert_eq!(
            fill_in,
            QuestionBody::FillIn {
                answer: String::new(),
            }
        );
    }
}
