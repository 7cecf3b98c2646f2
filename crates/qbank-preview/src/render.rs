use serde::{Deserialize, Serialize};

use qbank_model::{QuestionBody, QuestionRecord};

/// Caption shown for a fill-in answer that has not been set yet.
pub const ANSWER_UNSET_CAPTION: &str = "(answer not set)";

/// One option row in a choice preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewOption {
    pub text: String,
    /// Highlighted as a correct answer.
    pub correct: bool,
}

/// One item of an ordering preview, in solved order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderingItem {
    /// A solved-position entry backed by an existing option.
    Entry(String),
    /// An answer value with no matching option. Rendered as a visibly
    /// flagged placeholder instead of being silently dropped.
    Missing(String),
}

/// Kind-specific preview content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewBody {
    /// Single-choice or multi-select: every option, correct ones marked.
    Choice {
        multiple: bool,
        options: Vec<PreviewOption>,
    },
    /// Fill-in: a disabled input plus a caption stating the answer.
    FillIn { answer_caption: String },
    /// Ordering: entries strictly in the sequence given by the answer.
    /// Options absent from the answer are omitted; this mirrors how the
    /// quiz app grades and is intentional.
    Ordering { items: Vec<OrderingItem> },
    /// The record cannot be previewed (e.g. no question text yet).
    Error { message: String },
}

/// Read-only rendition of one record, matching the look of the consuming
/// quiz application. Pure function of the record; no editor state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewFragment {
    pub prompt: String,
    pub body: PreviewBody,
    /// Present only when the rationale has text.
    pub rationale: Option<String>,
    /// Present only when the hint is real (not a "no hint" placeholder).
    pub hint: Option<String>,
}

impl PreviewFragment {
    pub fn is_error(&self) -> bool {
        matches!(self.body, PreviewBody::Error { .. })
    }
}

/// Render a record into its preview.
pub fn render(record: &QuestionRecord) -> PreviewFragment {
    let prompt = record.prompt.trim().to_string();
    let body = if prompt.is_empty() {
        PreviewBody::Error {
            message: "this question has no text yet".to_string(),
        }
    } else {
        render_body(&record.body)
    };
    PreviewFragment {
        prompt,
        body,
        rationale: non_empty(&record.rationale),
        hint: record.effective_hint().map(String::from),
    }
}

fn render_body(body: &QuestionBody) -> PreviewBody {
    match body {
        QuestionBody::SingleChoice { options, answer } => PreviewBody::Choice {
            multiple: false,
            options: options
                .iter()
                .map(|text| PreviewOption {
                    text: text.clone(),
                    correct: answer.as_deref() == Some(text.as_str()),
                })
                .collect(),
        },
        QuestionBody::MultiSelect { options, answer } => PreviewBody::Choice {
            multiple: true,
            options: options
                .iter()
                .map(|text| PreviewOption {
                    text: text.clone(),
                    correct: answer.contains(text),
                })
                .collect(),
        },
        QuestionBody::FillIn { answer } => PreviewBody::FillIn {
            answer_caption: if answer.trim().is_empty() {
                ANSWER_UNSET_CAPTION.to_string()
            } else {
                answer.clone()
            },
        },
        QuestionBody::Ordering { options, answer } => PreviewBody::Ordering {
            items: answer
                .iter()
                .map(|value| {
                    if options.contains(value) {
                        OrderingItem::Entry(value.clone())
                    } else {
                        OrderingItem::Missing(value.clone())
                    }
                })
                .collect(),
        },
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
