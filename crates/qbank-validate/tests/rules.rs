//! Validation rule tests.

use qbank_form::FormFragment;
use qbank_model::{QuestionBody, QuestionId, QuestionRecord, SetMetadata};
use qbank_validate::{FieldRef, codes, validate_fragment, validate_record, validate_set};

fn record_with_body(body: QuestionBody) -> QuestionRecord {
    QuestionRecord {
        id: QuestionId::from_counter(1),
        prompt: "Prompt".to_string(),
        body,
        rationale: String::new(),
        hint: String::new(),
    }
}

fn metadata() -> SetMetadata {
    SetMetadata {
        subject: "Science".to_string(),
        grade: "5".to_string(),
        set_name: String::new(),
    }
}

#[test]
fn all_offending_fields_are_flagged_at_once() {
    // One empty option, only one valid option, nothing selected: all three
    // rules must fire, not just the first.
    let record = record_with_body(QuestionBody::SingleChoice {
        options: vec!["X".into(), String::new()],
        answer: None,
    });
    let report = validate_record(&record);

    assert!(report.field_flagged(FieldRef::Option(1)));
    assert!(report.has_code(codes::OPTION_EMPTY));
    assert!(report.has_code(codes::OPTIONS_INSUFFICIENT));
    assert!(report.has_code(codes::ANSWER_MISSING));
    assert!(!report.is_valid());
}

#[test]
fn whitespace_only_prompt_fails() {
    let mut record = record_with_body(QuestionBody::FillIn {
        answer: "Paris".into(),
    });
    record.prompt = "   ".to_string();
    let report = validate_record(&record);
    assert!(report.field_flagged(FieldRef::Prompt));
    assert!(report.has_code(codes::PROMPT_EMPTY));
}

#[test]
fn complete_records_pass() {
    let single = record_with_body(QuestionBody::SingleChoice {
        options: vec!["A".into(), "B".into()],
        answer: Some("B".into()),
    });
    assert!(validate_record(&single).is_valid());

    let ordering = record_with_body(QuestionBody::Ordering {
        options: vec!["A".into(), "B".into(), "C".into()],
        answer: vec!["C".into(), "A".into(), "B".into()],
    });
    assert!(validate_record(&ordering).is_valid());

    let fill_in = record_with_body(QuestionBody::FillIn {
        answer: "Paris".into(),
    });
    assert!(validate_record(&fill_in).is_valid());
}

#[test]
fn ordering_ranks_must_be_a_permutation() {
    let record = record_with_body(QuestionBody::Ordering {
        options: vec!["A".into(), "B".into(), "C".into()],
        answer: Vec::new(),
    });
    let mut fragment = FormFragment::from_record(&record);

    // Duplicate rank and an out-of-range rank.
    fragment.options[0].rank = "1".to_string();
    fragment.options[1].rank = "1".to_string();
    fragment.options[2].rank = "7".to_string();
    let report = validate_fragment(&fragment);
    assert!(report.has_code(codes::RANK_DUPLICATE));
    assert!(report.field_flagged(FieldRef::Rank(1)));
    assert!(report.has_code(codes::RANK_INVALID));
    assert!(report.field_flagged(FieldRef::Rank(2)));

    // Unparsable rank.
    fragment.options[1].rank = "abc".to_string();
    fragment.options[2].rank = "3".to_string();
    fragment.options[0].rank = "1".to_string();
    let report = validate_fragment(&fragment);
    assert!(report.field_flagged(FieldRef::Rank(1)));
    assert!(report.has_code(codes::RANK_INVALID));
}

#[test]
fn ordering_answer_must_cover_every_option() {
    // "B" never appears in the answer sequence: its rank input renders
    // empty, which fails the permutation rule.
    let record = record_with_body(QuestionBody::Ordering {
        options: vec!["A".into(), "B".into()],
        answer: vec!["A".into()],
    });
    let report = validate_record(&record);
    assert!(report.has_code(codes::RANK_INVALID));
    assert!(report.field_flagged(FieldRef::Rank(1)));
}

#[test]
fn multi_select_needs_a_selection() {
    let record = record_with_body(QuestionBody::MultiSelect {
        options: vec!["A".into(), "B".into()],
        answer: std::collections::BTreeSet::new(),
    });
    let report = validate_record(&record);
    assert!(report.has_code(codes::ANSWER_MISSING));
    assert!(report.field_flagged(FieldRef::Answer));
}

#[test]
fn metadata_and_set_level_rules_feed_the_aggregate() {
    let valid = record_with_body(QuestionBody::FillIn {
        answer: "Paris".into(),
    });

    let report = validate_set(&metadata(), std::slice::from_ref(&valid));
    assert!(report.is_valid());
    assert!(report.export_allowed());

    let mut incomplete = metadata();
    incomplete.subject = String::new();
    let report = validate_set(&incomplete, std::slice::from_ref(&valid));
    assert!(!report.is_valid());
    assert!(!report.export_allowed());
    assert!(
        report
            .metadata_issues
            .iter()
            .any(|issue| issue.code == codes::SUBJECT_EMPTY)
    );

    let report = validate_set(&metadata(), &[]);
    assert!(!report.is_valid());
    assert!(report.set_issues.iter().any(|issue| issue.code == codes::SET_EMPTY));
}

#[test]
fn reports_serialize_for_the_ui_layer() {
    let record = record_with_body(QuestionBody::SingleChoice {
        options: vec!["X".into(), String::new()],
        answer: None,
    });
    let report = validate_set(&metadata(), &[record]);
    let json = serde_json::to_string(&report).expect("serialize report");
    let round: qbank_validate::SetReport = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(round.issue_count(), report.issue_count());
}
