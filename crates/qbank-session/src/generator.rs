//! AI-generation collaborator boundary.
//!
//! The editor can ask an external backend to draft question records from
//! a source document. The network transport lives outside this crate;
//! [`QuestionGenerator`] is the narrow interface a session drives, and
//! the request/response shapes match the backend contract: a multipart
//! payload out, a `{ success, questions, message }` JSON body back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use qbank_model::QuestionKind;

/// The uploaded source document.
#[derive(Debug, Clone)]
pub struct DocumentPayload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// An outbound generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub document: DocumentPayload,
    pub subject: String,
    pub grade: String,
    /// Desired number of questions.
    pub count: u32,
    /// Free-text guidance for the generator.
    pub notes: String,
    /// Question kinds the author wants.
    pub kinds: Vec<QuestionKind>,
}

impl GenerationRequest {
    /// The comma-joined kind list as the backend expects it
    /// (e.g. "single,multi-select").
    pub fn kinds_field(&self) -> String {
        self.kinds
            .iter()
            .map(QuestionKind::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The backend's response body.
///
/// `questions` stays as raw JSON values here: each record goes through
/// the same minimal shape check as a file import when the session applies
/// the response, and a malformed record aborts the whole application so
/// no partial batch is ever committed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(default)]
    pub questions: Vec<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// External question-generation collaborator.
///
/// Implementations block until the backend answers; the session disables
/// further submissions while a request is outstanding. There is no retry
/// or timeout policy at this boundary.
pub trait QuestionGenerator {
    fn generate(&self, request: &GenerationRequest) -> anyhow::Result<GenerationResponse>;
}
