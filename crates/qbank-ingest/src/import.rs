use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use qbank_model::{QuestionKind, SetMetadata, WireDocument, WireQuestion};

use crate::error::{IngestError, Result};

/// One externally supplied file: its display name and raw bytes.
///
/// The actual picker/dialog lives outside this crate; this is the
/// "load raw bytes" boundary.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a source file from disk (CLI path).
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// The usable content of one parsed file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub name: String,
    pub metadata: Option<SetMetadata>,
    pub questions: Vec<WireQuestion>,
    /// Records dropped by the minimal shape check or an unknown kind.
    pub skipped_records: usize,
}

/// The merged result of an import batch.
///
/// Not `Clone`: `failed_files` keeps the original [`IngestError`] values,
/// which wrap non-cloneable io/serde errors.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    /// Metadata from the first file that supplied any.
    pub metadata: Option<SetMetadata>,
    /// All usable questions, concatenated in file order.
    pub questions: Vec<WireQuestion>,
    /// Files that could not be parsed at all, with the failure.
    pub failed_files: Vec<(String, IngestError)>,
    /// Malformed records skipped across all parseable files.
    pub skipped_records: usize,
}

impl ImportOutcome {
    /// True when the batch produced at least one usable record.
    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }
}

/// Parse one question-set file.
///
/// Accepts either the `{ metadata, questions }` wrapper or a bare array.
/// Each record gets the minimal shape check (`Question` and `type`
/// present and string-typed, kind recognized); offenders are skipped with
/// a warning while the rest of the file is kept.
pub fn parse_file(file: &SourceFile) -> Result<ParsedFile> {
    let value: Value =
        serde_json::from_slice(&file.bytes).map_err(|error| IngestError::Parse {
            name: file.name.clone(),
            message: error.to_string(),
        })?;
    let document: WireDocument =
        serde_json::from_value(value).map_err(|_| IngestError::NotAQuestionSet {
            name: file.name.clone(),
        })?;

    let mut questions = Vec::new();
    let mut skipped_records = 0usize;
    for (index, entry) in document.questions().iter().enumerate() {
        match shape_check(entry) {
            Ok(question) => questions.push(question),
            Err(error) => {
                warn!(
                    file = %file.name,
                    record = index,
                    %error,
                    "skipping malformed question record"
                );
                skipped_records += 1;
            }
        }
    }

    debug!(
        file = %file.name,
        kept = questions.len(),
        skipped = skipped_records,
        "parsed question-set file"
    );
    Ok(ParsedFile {
        name: file.name.clone(),
        metadata: document.metadata().cloned(),
        questions,
        skipped_records,
    })
}

/// Import a batch of files into one merged outcome.
///
/// Every file is processed to completion: a file that fails to parse is
/// recorded and the rest of the batch continues. Metadata comes from the
/// first file that supplied any. Returns [`IngestError::NoValidRecords`]
/// only when the whole batch yields nothing usable — the single
/// user-visible import failure.
pub fn import_files(files: &[SourceFile]) -> Result<ImportOutcome> {
    let mut outcome = ImportOutcome::default();
    for file in files {
        match parse_file(file) {
            Ok(parsed) => {
                if outcome.metadata.is_none()
                    && let Some(metadata) = parsed.metadata
                    && metadata.is_populated()
                {
                    outcome.metadata = Some(metadata);
                }
                outcome.questions.extend(parsed.questions);
                outcome.skipped_records += parsed.skipped_records;
            }
            Err(error) => {
                warn!(file = %file.name, %error, "skipping unreadable file");
                outcome.failed_files.push((file.name.clone(), error));
            }
        }
    }
    if !outcome.has_questions() {
        return Err(IngestError::NoValidRecords);
    }
    Ok(outcome)
}

fn shape_check(entry: &Value) -> qbank_model::Result<WireQuestion> {
    let question = WireQuestion::from_value(entry)?;
    // Reject unknown kinds here so downstream conversion is total.
    question.kind.parse::<QuestionKind>()?;
    Ok(question)
}
