use serde_json::json;

use qbank_model::{QuestionRecord, SetMetadata, UNKNOWN_METADATA, WireQuestion};

use crate::error::Result;

/// Fallback file stem when no metadata part survives sanitization.
const DEFAULT_FILE_STEM: &str = "questions";

/// Serialize a set into the export file format.
///
/// The output is the `{ metadata, questions }` wrapper the quiz-taking
/// application consumes, pretty-printed for diff-friendly storage.
pub fn export_set(metadata: &SetMetadata, records: &[QuestionRecord]) -> Result<Vec<u8>> {
    let questions: Vec<WireQuestion> = records.iter().map(WireQuestion::from_record).collect();
    let document = json!({
        "metadata": metadata,
        "questions": questions,
    });
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// Derive the export filename from the set metadata.
///
/// Sanitized subject, grade (omitted when absent or "Unknown"), and set
/// name (omitted when absent, "Unknown", or the default "Set") are joined
/// with underscores, lower-cased, and stripped of trailing underscores,
/// falling back to "questions" when nothing survives.
pub fn export_filename(metadata: &SetMetadata) -> String {
    let mut parts: Vec<String> = Vec::new();
    push_part(&mut parts, &metadata.subject, &[UNKNOWN_METADATA]);
    push_part(&mut parts, &metadata.grade, &[UNKNOWN_METADATA]);
    push_part(&mut parts, &metadata.set_name, &[UNKNOWN_METADATA, "Set"]);

    let mut stem = parts.join("_").to_lowercase();
    while stem.ends_with('_') {
        stem.pop();
    }
    if stem.is_empty() {
        stem = DEFAULT_FILE_STEM.to_string();
    }
    format!("{stem}.json")
}

fn push_part(parts: &mut Vec<String>, value: &str, omitted: &[&str]) {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || omitted
            .iter()
            .any(|skip| trimmed.eq_ignore_ascii_case(skip))
    {
        return;
    }
    let sanitized = sanitize(trimmed);
    if !sanitized.is_empty() {
        parts.push(sanitized);
    }
}

/// Replace filesystem-hostile characters with underscores, collapsing
/// runs and trimming the ends.
fn sanitize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last_was_separator = true;
    for c in value.chars() {
        if c.is_alphanumeric() {
            out.push(c);
            last_was_separator = false;
        } else if !last_was_separator {
            out.push('_');
            last_was_separator = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}
