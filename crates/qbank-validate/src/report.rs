use serde::{Deserialize, Serialize};

use qbank_model::QuestionId;

/// The form input a validation issue points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRef {
    Prompt,
    /// The options section as a whole (e.g. not enough valid entries).
    Options,
    /// One option text input, by display index.
    Option(usize),
    /// The answer section (missing selection, empty fill-in text).
    Answer,
    /// One rank input, by display index (ordering kind).
    Rank(usize),
    Subject,
    Grade,
    /// The question list as a whole (set level).
    Questions,
}

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable rule code (e.g. "prompt_empty").
    pub code: String,
    /// Human-readable message shown next to the field.
    pub message: String,
    /// The input the issue decorates.
    pub field: FieldRef,
}

impl ValidationIssue {
    pub fn new(code: &str, message: impl Into<String>, field: FieldRef) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field,
        }
    }
}

/// Validation result for one question record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordReport {
    pub record_id: QuestionId,
    pub issues: Vec<ValidationIssue>,
}

impl RecordReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// True when some issue decorates the given field.
    pub fn field_flagged(&self, field: FieldRef) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}

/// Validation result for a whole question set.
///
/// Aggregate validity is the logical AND of the metadata checks, the
/// set-level checks, and every record report. Export is gated strictly on
/// the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetReport {
    /// Metadata issues (subject, grade).
    pub metadata_issues: Vec<ValidationIssue>,
    /// Set-level issues (e.g. no records at all).
    pub set_issues: Vec<ValidationIssue>,
    /// One report per record, in set order.
    pub records: Vec<RecordReport>,
}

impl SetReport {
    pub fn is_valid(&self) -> bool {
        self.metadata_issues.is_empty()
            && self.set_issues.is_empty()
            && self.records.iter().all(RecordReport::is_valid)
    }

    /// The export action is enabled only for a fully valid set.
    pub fn export_allowed(&self) -> bool {
        self.is_valid()
    }

    pub fn issue_count(&self) -> usize {
        self.metadata_issues.len()
            + self.set_issues.len()
            + self.records.iter().map(|report| report.issues.len()).sum::<usize>()
    }

    /// Reports of records that failed, in set order.
    pub fn failing_records(&self) -> impl Iterator<Item = &RecordReport> {
        self.records.iter().filter(|report| !report.is_valid())
    }
}
