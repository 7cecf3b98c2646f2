//! Record ↔ fragment mapping tests.

use qbank_form::FormFragment;
use qbank_model::{QuestionBody, QuestionId, QuestionKind, QuestionRecord};

fn record_with_body(body: QuestionBody) -> QuestionRecord {
    QuestionRecord {
        id: QuestionId::from_counter(1),
        prompt: "Prompt".to_string(),
        body,
        rationale: String::new(),
        hint: String::new(),
    }
}

#[test]
fn ordering_ranks_read_back_in_rank_order() {
    let record = record_with_body(QuestionBody::Ordering {
        options: vec!["A".into(), "B".into(), "C".into()],
        answer: Vec::new(),
    });
    let mut fragment = FormFragment::from_record(&record);
    fragment.options[0].rank = "3".to_string();
    fragment.options[1].rank = "1".to_string();
    fragment.options[2].rank = "2".to_string();

    let read = fragment.read_record();
    assert_eq!(
        read.body,
        QuestionBody::Ordering {
            options: vec!["A".into(), "B".into(), "C".into()],
            answer: vec!["B".into(), "C".into(), "A".into()],
        }
    );
}

#[test]
fn ordering_read_back_tolerates_garbage_ranks() {
    let record = record_with_body(QuestionBody::Ordering {
        options: vec!["A".into(), "B".into(), "C".into()],
        answer: Vec::new(),
    });
    let mut fragment = FormFragment::from_record(&record);
    fragment.options[0].rank = "not a number".to_string();
    fragment.options[1].rank = "2".to_string();
    fragment.options[2].rank = String::new();

    // Ranked rows first, unparsable rows sink to the end in display order.
    let read = fragment.read_record();
    if let QuestionBody::Ordering { answer, .. } = read.body {
        assert_eq!(answer, vec!["B".to_string(), "A".to_string(), "C".to_string()]);
    } else {
        panic!("kind changed during read-back");
    }
}

#[test]
fn ordering_answer_prefills_ranks() {
    let record = record_with_body(QuestionBody::Ordering {
        options: vec!["A".into(), "B".into(), "C".into()],
        answer: vec!["C".into(), "A".into(), "B".into()],
    });
    let fragment = FormFragment::from_record(&record);
    let ranks: Vec<&str> = fragment.options.iter().map(|slot| slot.rank.as_str()).collect();
    assert_eq!(ranks, vec!["2", "3", "1"]);
}

#[test]
fn selection_rederives_by_text_not_position() {
    let record = record_with_body(QuestionBody::MultiSelect {
        options: vec!["A".into(), "B".into(), "C".into()],
        answer: ["A".to_string(), "C".to_string()].into_iter().collect(),
    });
    let mut fragment = FormFragment::from_record(&record);

    // Reorder and drop an option; marks must follow the text.
    fragment.set_options(&["C".to_string(), "B".to_string()]);
    let selected: Vec<&str> = fragment
        .options
        .iter()
        .filter(|slot| slot.selected)
        .map(|slot| slot.text.as_str())
        .collect();
    assert_eq!(selected, vec!["C"]);

    let read = fragment.read_record();
    assert_eq!(
        read.body,
        QuestionBody::MultiSelect {
            options: vec!["C".into(), "B".into()],
            answer: ["C".to_string()].into_iter().collect(),
        }
    );
}

#[test]
fn selected_empty_texts_are_filtered_from_answers() {
    let record = record_with_body(QuestionBody::SingleChoice {
        options: vec!["X".into(), String::new()],
        answer: None,
    });
    let mut fragment = FormFragment::from_record(&record);
    fragment.options[1].selected = true;

    let read = fragment.read_record();
    assert_eq!(
        read.body,
        QuestionBody::SingleChoice {
            options: vec!["X".into(), String::new()],
            answer: None,
        }
    );
}

#[test]
fn option_kinds_always_render_one_slot() {
    for kind in [
        QuestionKind::SingleChoice,
        QuestionKind::MultiSelect,
        QuestionKind::Ordering,
    ] {
        let record = QuestionRecord::with_kind(QuestionId::from_counter(1), kind);
        let fragment = FormFragment::from_record(&record);
        assert_eq!(fragment.options.len(), 1, "kind {kind} should seed a slot");
        assert!(!fragment.can_remove_option());
    }

    let fill_in = QuestionRecord::with_kind(QuestionId::from_counter(1), QuestionKind::FillIn);
    let fragment = FormFragment::from_record(&fill_in);
    assert!(fragment.options.is_empty());
}

#[test]
fn last_option_slot_cannot_be_removed() {
    let record = record_with_body(QuestionBody::SingleChoice {
        options: vec!["A".into(), "B".into()],
        answer: Some("A".into()),
    });
    let mut fragment = FormFragment::from_record(&record);
    assert!(fragment.remove_option_slot(1));
    assert!(!fragment.remove_option_slot(0));
    assert_eq!(fragment.options.len(), 1);
}

#[test]
fn fill_in_round_trips_the_answer_text() {
    let record = record_with_body(QuestionBody::FillIn {
        answer: "Paris".into(),
    });
    let fragment = FormFragment::from_record(&record);
    assert_eq!(fragment.fill_in_answer, "Paris");
    assert_eq!(fragment.read_record(), record);
}
