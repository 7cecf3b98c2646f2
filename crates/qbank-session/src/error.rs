use qbank_ingest::IngestError;
use qbank_model::QuestionId;
use thiserror::Error;

/// Errors surfaced by session operations.
///
/// These are refusals shown to the user, not crashes: a gated export, a
/// guarded invariant, or a collaborator failure. Per-field input problems
/// never appear here — they live in validation reports.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A set must always keep at least one question.
    #[error("a set must contain at least one question")]
    LastQuestion,

    /// The option being removed is the record's only one.
    #[error("a question must keep at least one option")]
    LastOption,

    /// No record with this ID exists.
    #[error("no question with id {0}")]
    UnknownQuestion(QuestionId),

    /// Export was refused because the set does not validate.
    #[error("export blocked: {issues} validation issue(s) remain")]
    ExportBlocked { issues: usize },

    /// Import failed to produce any usable record.
    #[error(transparent)]
    Import(#[from] IngestError),

    /// The set could not be serialized for saving. Distinct from
    /// [`SessionError::Import`] so save-path failures never read as
    /// import problems.
    #[error("export failed: {0}")]
    Export(#[source] IngestError),

    /// A generation request is already outstanding.
    #[error("a generation request is already running")]
    GenerationInFlight,

    /// The generation collaborator failed or returned a malformed
    /// response. The message is surfaced verbatim.
    #[error("question generation failed: {0}")]
    GenerationFailed(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_path_failures_read_as_export_errors() {
        let err = SessionError::Export(IngestError::NoValidRecords);
        assert!(err.to_string().starts_with("export failed"));

        let err = SessionError::Import(IngestError::NoValidRecords);
        assert_eq!(
            err.to_string(),
            "no valid question records found in the selected files"
        );
    }
}
