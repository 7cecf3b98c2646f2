//! Tests for qbank-model types.

use qbank_model::{
    QuestionBody, QuestionId, QuestionKind, QuestionRecord, SetMetadata, WireQuestion,
};
use serde_json::json;

#[test]
fn metadata_serializes_with_wire_field_names() {
    let metadata = SetMetadata {
        subject: "Science".to_string(),
        grade: "5".to_string(),
        set_name: "Planets".to_string(),
    };
    let value = serde_json::to_value(&metadata).expect("serialize metadata");
    assert_eq!(value["setName"], json!("Planets"));
    let round: SetMetadata = serde_json::from_value(value).expect("deserialize metadata");
    assert_eq!(round.subject, "Science");
}

#[test]
fn exported_wire_question_matches_consumer_schema() {
    let record = QuestionRecord {
        id: QuestionId::from_counter(3),
        prompt: "Arrange these planets in order from the sun.".to_string(),
        body: QuestionBody::Ordering {
            options: vec!["Mars".into(), "Venus".into(), "Mercury".into()],
            answer: vec!["Mercury".into(), "Venus".into(), "Mars".into()],
        },
        rationale: "Distance from the sun.".to_string(),
        hint: String::new(),
    };

    let value = serde_json::to_value(WireQuestion::from_record(&record)).expect("serialize");
    assert_eq!(value["id"], json!("q_3"));
    assert_eq!(value["type"], json!("ordering"));
    assert_eq!(
        value["Question"],
        json!("Arrange these planets in order from the sun.")
    );
    assert_eq!(value["Options"], json!(["Mars", "Venus", "Mercury"]));
    assert_eq!(value["answer"], json!(["Mercury", "Venus", "Mars"]));
    assert_eq!(value["Rationale"], json!("Distance from the sun."));
}

#[test]
fn fill_in_exports_empty_options_and_string_answer() {
    let record = QuestionRecord {
        id: QuestionId::from_counter(1),
        prompt: "The capital of France is ____.".to_string(),
        body: QuestionBody::FillIn {
            answer: "Paris".into(),
        },
        rationale: String::new(),
        hint: String::new(),
    };
    let value = serde_json::to_value(WireQuestion::from_record(&record)).expect("serialize");
    assert_eq!(value["Options"], json!([]));
    assert_eq!(value["answer"], json!("Paris"));
}

#[test]
fn new_records_default_to_single_choice() {
    let record = QuestionRecord::new(QuestionId::from_counter(1));
    assert_eq!(record.kind(), QuestionKind::SingleChoice);
    assert!(record.body.options().is_some_and(<[String]>::is_empty));
}
