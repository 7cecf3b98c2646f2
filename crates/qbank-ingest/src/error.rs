//! Error types for question-set import and export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur at the file boundary.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to read a source file from disk.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid JSON.
    #[error("failed to parse {name}: {message}")]
    Parse { name: String, message: String },

    /// JSON parsed but is neither a question array nor a
    /// `{ metadata, questions }` object.
    #[error("{name} is not a question-set file")]
    NotAQuestionSet { name: String },

    /// No file in the batch yielded a single usable question record.
    #[error("no valid question records found in the selected files")]
    NoValidRecords,

    /// Failed to serialize the set for export.
    #[error("failed to serialize question set: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IngestError::NotAQuestionSet {
            name: "notes.json".to_string(),
        };
        assert_eq!(err.to_string(), "notes.json is not a question-set file");
    }
}
