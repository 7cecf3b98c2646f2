//! Wire representation of question-set files.
//!
//! This is the JSON schema shared with the quiz-taking application and the
//! generation backend: capitalized `Question`/`Options`/`Rationale` keys, a
//! `type` discriminator, and an `answer` whose shape depends on the kind
//! (string, array of strings, or null).
//!
//! Imported records get only minimal shape validation here (`Question` and
//! `type` present and string-typed); everything else is coerced leniently
//! so a sloppy source file degrades to flagged-but-editable records instead
//! of a failed import.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::ids::QuestionId;
use crate::kind::QuestionKind;
use crate::metadata::SetMetadata;
use crate::record::{QuestionBody, QuestionRecord};

/// One question as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireQuestion {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Options", default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: Value,
    #[serde(rename = "Rationale", default)]
    pub rationale: String,
    #[serde(default)]
    pub hint: String,
}

/// A question-set file: either the `{ metadata, questions }` wrapper or a
/// bare array of question objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireDocument {
    Wrapped {
        #[serde(default)]
        metadata: Option<SetMetadata>,
        questions: Vec<Value>,
    },
    Bare(Vec<Value>),
}

impl WireDocument {
    pub fn metadata(&self) -> Option<&SetMetadata> {
        match self {
            WireDocument::Wrapped { metadata, .. } => metadata.as_ref(),
            WireDocument::Bare(_) => None,
        }
    }

    pub fn questions(&self) -> &[Value] {
        match self {
            WireDocument::Wrapped { questions, .. } => questions,
            WireDocument::Bare(questions) => questions,
        }
    }
}

impl WireQuestion {
    /// Extract a wire question from a raw JSON value.
    ///
    /// Fails only the minimal shape check: `Question` and `type` must be
    /// present and string-typed. All other fields fall back to a lenient
    /// default when missing or of the wrong type.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or(ModelError::MissingField("Question"))?;

        let question = require_string(object, "Question")?;
        let kind = require_string(object, "type")?;

        let options = object
            .get("Options")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let answer = match object.get("answer") {
            Some(answer @ (Value::String(_) | Value::Array(_))) => answer.clone(),
            _ => Value::Null,
        };

        Ok(Self {
            id: string_or_default(object, "id"),
            kind,
            question,
            options,
            answer,
            rationale: string_or_default(object, "Rationale"),
            hint: string_or_default(object, "hint"),
        })
    }

    /// Convert to a canonical record under a store-assigned ID.
    ///
    /// Answers are shaped to the kind; values of the wrong shape collapse
    /// to "unset" rather than erroring. Answer references to missing
    /// options are preserved as imported — the validator flags them and
    /// the editor repairs them on the first options edit.
    pub fn into_record(self, id: QuestionId) -> Result<QuestionRecord> {
        let kind: QuestionKind = self.kind.parse()?;
        let body = match kind {
            QuestionKind::SingleChoice => QuestionBody::SingleChoice {
                options: self.options,
                answer: self
                    .answer
                    .as_str()
                    .filter(|text| !text.is_empty())
                    .map(String::from),
            },
            QuestionKind::MultiSelect => QuestionBody::MultiSelect {
                options: self.options,
                answer: answer_strings(&self.answer).into_iter().collect(),
            },
            QuestionKind::Ordering => QuestionBody::Ordering {
                options: self.options,
                answer: answer_strings(&self.answer),
            },
            QuestionKind::FillIn => QuestionBody::FillIn {
                answer: self.answer.as_str().unwrap_or_default().to_string(),
            },
        };
        Ok(QuestionRecord {
            id,
            prompt: self.question,
            body,
            rationale: self.rationale,
            hint: self.hint,
        })
    }

    /// Build the wire form of a canonical record.
    pub fn from_record(record: &QuestionRecord) -> Self {
        let (options, answer) = match &record.body {
            QuestionBody::SingleChoice { options, answer } => (
                options.clone(),
                answer
                    .as_ref()
                    .map_or(Value::Null, |text| Value::String(text.clone())),
            ),
            QuestionBody::MultiSelect { options, answer } => (
                options.clone(),
                Value::Array(answer.iter().cloned().map(Value::String).collect()),
            ),
            QuestionBody::Ordering { options, answer } => (
                options.clone(),
                Value::Array(answer.iter().cloned().map(Value::String).collect()),
            ),
            QuestionBody::FillIn { answer } => {
                (Vec::new(), Value::String(answer.clone()))
            }
        };
        Self {
            id: record.id.as_str().to_string(),
            kind: record.kind().as_str().to_string(),
            question: record.prompt.clone(),
            options,
            answer,
            rationale: record.rationale.clone(),
            hint: record.hint.clone(),
        }
    }
}

fn require_string(
    object: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<String> {
    match object.get(field) {
        None => Err(ModelError::MissingField(field)),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(ModelError::FieldNotString(field)),
    }
}

fn string_or_default(object: &serde_json::Map<String, Value>, field: &str) -> String {
    object
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Collect the string entries of an answer array, ignoring anything else.
fn answer_strings(answer: &Value) -> Vec<String> {
    answer
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fresh_id() -> QuestionId {
        QuestionId::from_counter(1)
    }

    #[test]
    fn minimal_shape_check_rejects_missing_fields() {
        let missing_question = json!({ "type": "single" });
        assert!(matches!(
            WireQuestion::from_value(&missing_question),
            Err(ModelError::MissingField("Question"))
        ));

        let numeric_type = json!({ "Question": "Q?", "type": 4 });
        assert!(matches!(
            WireQuestion::from_value(&numeric_type),
            Err(ModelError::FieldNotString("type"))
        ));
    }

    #[test]
    fn lenient_fields_default_instead_of_failing() {
        let value = json!({
            "Question": "Pick one.",
            "type": "single",
            "Options": ["A", 7, "B"],
            "answer": { "unexpected": true },
            "hint": null,
        });
        let wire = WireQuestion::from_value(&value).unwrap();
        assert_eq!(wire.options, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(wire.answer, Value::Null);
        assert_eq!(wire.hint, "");
        assert_eq!(wire.rationale, "");
    }

    #[test]
    fn into_record_shapes_answer_per_kind() {
        let ordering = WireQuestion::from_value(&json!({
            "Question": "Order the planets.",
            "type": "ordering",
            "Options": ["Venus", "Mercury"],
            "answer": ["Mercury", "Venus"],
        }))
        .unwrap()
        .into_record(fresh_id())
        .unwrap();
        assert_eq!(
            ordering.body,
            QuestionBody::Ordering {
                options: vec!["Venus".into(), "Mercury".into()],
                answer: vec!["Mercury".into(), "Venus".into()],
            }
        );

        let fill_in = WireQuestion::from_value(&json!({
            "Question": "Capital of France?",
            "type": "fill-in",
            "answer": "Paris",
        }))
        .unwrap()
        .into_record(fresh_id())
        .unwrap();
        assert_eq!(
            fill_in.body,
            QuestionBody::FillIn {
                answer: "Paris".into()
            }
        );
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let wire = WireQuestion::from_value(&json!({
            "Question": "Q?",
            "type": "essay",
        }))
        .unwrap();
        assert!(matches!(
            wire.into_record(fresh_id()),
            Err(ModelError::UnknownKind(_))
        ));
    }

    #[test]
    fn wire_document_accepts_bare_arrays_and_wrappers() {
        let bare: WireDocument =
            serde_json::from_value(json!([{ "Question": "Q?", "type": "single" }])).unwrap();
        assert!(bare.metadata().is_none());
        assert_eq!(bare.questions().len(), 1);

        let wrapped: WireDocument = serde_json::from_value(json!({
            "metadata": { "subject": "Science", "grade": "5", "setName": "Planets" },
            "questions": [],
        }))
        .unwrap();
        assert_eq!(wrapped.metadata().unwrap().subject, "Science");
    }

    #[test]
    fn record_round_trips_through_wire_form() {
        let record = WireQuestion::from_value(&json!({
            "Question": "Pick two.",
            "type": "multi-select",
            "Options": ["A", "B", "C"],
            "answer": ["C", "A"],
            "Rationale": "Because.",
            "hint": "No hint available.",
        }))
        .unwrap()
        .into_record(fresh_id())
        .unwrap();

        let wire = WireQuestion::from_record(&record);
        assert_eq!(wire.kind, "multi-select");
        // Multi-select answers are sets; the exported array is sorted.
        assert_eq!(wire.answer, json!(["A", "C"]));
        assert_eq!(wire.question, "Pick two.");
    }
}
