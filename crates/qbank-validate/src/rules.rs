//! Validation rules.
//!
//! Every rule is evaluated independently and all of them run even after
//! one fails, so every offending field ends up flagged at once. Rules are
//! pure functions of the fragment (the editor case) or of a record, which
//! is validated through its form projection so both paths agree.

use std::collections::BTreeSet;

use qbank_form::{FormFragment, OptionSlot, RANK_FALLBACK};
use qbank_model::{QuestionKind, QuestionRecord, SetMetadata};

use crate::report::{FieldRef, RecordReport, SetReport, ValidationIssue};

/// Minimum number of non-empty options a choice question needs.
pub const MIN_VALID_OPTIONS: usize = 2;

pub mod codes {
    pub const PROMPT_EMPTY: &str = "prompt_empty";
    pub const OPTION_EMPTY: &str = "option_empty";
    pub const OPTIONS_INSUFFICIENT: &str = "options_insufficient";
    pub const ANSWER_MISSING: &str = "answer_missing";
    pub const RANK_INVALID: &str = "rank_invalid";
    pub const RANK_DUPLICATE: &str = "rank_duplicate";
    pub const SUBJECT_EMPTY: &str = "subject_empty";
    pub const GRADE_EMPTY: &str = "grade_empty";
    pub const SET_EMPTY: &str = "set_empty";
}

/// Validate one editable fragment, flagging every offending input.
pub fn validate_fragment(fragment: &FormFragment) -> RecordReport {
    let mut issues = Vec::new();

    if fragment.prompt.trim().is_empty() {
        issues.push(ValidationIssue::new(
            codes::PROMPT_EMPTY,
            "question text is required",
            FieldRef::Prompt,
        ));
    }

    if fragment.kind.has_options() {
        check_options(fragment, &mut issues);
    }
    check_answer(fragment, &mut issues);

    RecordReport {
        record_id: fragment.record_id.clone(),
        issues,
    }
}

/// Validate a raw record through its form projection, so a record and the
/// fragment rendered from it always agree on validity.
pub fn validate_record(record: &QuestionRecord) -> RecordReport {
    validate_fragment(&FormFragment::from_record(record))
}

/// Validate the set-level metadata fields.
pub fn validate_metadata(metadata: &SetMetadata) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if metadata.subject.trim().is_empty() {
        issues.push(ValidationIssue::new(
            codes::SUBJECT_EMPTY,
            "subject is required",
            FieldRef::Subject,
        ));
    }
    if metadata.grade.trim().is_empty() {
        issues.push(ValidationIssue::new(
            codes::GRADE_EMPTY,
            "grade level is required",
            FieldRef::Grade,
        ));
    }
    issues
}

/// Validate a whole set: metadata, set-level structure, and every record.
pub fn validate_set(metadata: &SetMetadata, records: &[QuestionRecord]) -> SetReport {
    let mut set_issues = Vec::new();
    if records.is_empty() {
        set_issues.push(ValidationIssue::new(
            codes::SET_EMPTY,
            "a set needs at least one question",
            FieldRef::Questions,
        ));
    }
    SetReport {
        metadata_issues: validate_metadata(metadata),
        set_issues,
        records: records.iter().map(validate_record).collect(),
    }
}

fn valid_option_count(options: &[OptionSlot]) -> usize {
    options
        .iter()
        .filter(|slot| !slot.text.trim().is_empty())
        .count()
}

fn check_options(fragment: &FormFragment, issues: &mut Vec<ValidationIssue>) {
    for (index, slot) in fragment.options.iter().enumerate() {
        if slot.text.trim().is_empty() {
            issues.push(ValidationIssue::new(
                codes::OPTION_EMPTY,
                "option text is empty",
                FieldRef::Option(index),
            ));
        }
    }
    if valid_option_count(&fragment.options) < MIN_VALID_OPTIONS {
        issues.push(ValidationIssue::new(
            codes::OPTIONS_INSUFFICIENT,
            format!("at least {MIN_VALID_OPTIONS} options with text are required"),
            FieldRef::Options,
        ));
    }
}

fn check_answer(fragment: &FormFragment, issues: &mut Vec<ValidationIssue>) {
    match fragment.kind {
        QuestionKind::SingleChoice | QuestionKind::MultiSelect => {
            let any_selected = fragment
                .options
                .iter()
                .any(|slot| slot.selected && !slot.text.trim().is_empty());
            if !any_selected {
                issues.push(ValidationIssue::new(
                    codes::ANSWER_MISSING,
                    "mark at least one option as correct",
                    FieldRef::Answer,
                ));
            }
        }
        QuestionKind::FillIn => {
            if fragment.fill_in_answer.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    codes::ANSWER_MISSING,
                    "the correct answer text is required",
                    FieldRef::Answer,
                ));
            }
        }
        QuestionKind::Ordering => check_ranks(fragment, issues),
    }
}

/// Ordering answers must assign exactly one rank to every valid option,
/// and the ranks must form a permutation of 1..=N.
fn check_ranks(fragment: &FormFragment, issues: &mut Vec<ValidationIssue>) {
    let valid_count = valid_option_count(&fragment.options) as u32;
    let mut seen: BTreeSet<u32> = BTreeSet::new();

    for (index, slot) in fragment.options.iter().enumerate() {
        if slot.text.trim().is_empty() {
            continue;
        }
        let rank = slot.parsed_rank();
        if rank == RANK_FALLBACK || rank < 1 || rank > valid_count {
            issues.push(ValidationIssue::new(
                codes::RANK_INVALID,
                format!("rank must be a number between 1 and {valid_count}"),
                FieldRef::Rank(index),
            ));
        } else if !seen.insert(rank) {
            issues.push(ValidationIssue::new(
                codes::RANK_DUPLICATE,
                format!("rank {rank} is used more than once"),
                FieldRef::Rank(index),
            ));
        }
    }
}
