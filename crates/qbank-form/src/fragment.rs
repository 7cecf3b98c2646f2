use serde::{Deserialize, Serialize};

use qbank_model::{QuestionBody, QuestionId, QuestionKind, QuestionRecord};

/// Rank value assigned to option rows whose rank input cannot be parsed.
///
/// Unparsable rows sink to the end of the read-back sequence but keep
/// their relative display order; the validator flags them.
pub const RANK_FALLBACK: u32 = u32::MAX;

/// One editable option row: its text, whether it is marked correct
/// (single/multi kinds), and the raw rank input (ordering kind).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSlot {
    pub text: String,
    pub selected: bool,
    pub rank: String,
}

impl OptionSlot {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selected: false,
            rank: String::new(),
        }
    }

    /// The rank as entered, or [`RANK_FALLBACK`] when empty or unparsable.
    pub fn parsed_rank(&self) -> u32 {
        self.rank.trim().parse().unwrap_or(RANK_FALLBACK)
    }
}

/// The editable projection of one question record.
///
/// This is the data contract a front end binds its widgets to. It holds
/// the committed value of every input; [`FormFragment::read_record`] is
/// the exact inverse of [`FormFragment::from_record`] for well-formed
/// states and a total, never-panicking best effort for malformed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFragment {
    pub record_id: QuestionId,
    pub kind: QuestionKind,
    pub prompt: String,
    /// Option rows; present (with at least one row) for option-bearing
    /// kinds, empty for fill-in.
    pub options: Vec<OptionSlot>,
    /// The free-text answer input (fill-in kind only).
    pub fill_in_answer: String,
    pub rationale: String,
    pub hint: String,
}

impl FormFragment {
    /// Build the full editable block for a record.
    ///
    /// Option-bearing kinds always get at least one (empty) option row,
    /// even when the record has no options yet.
    pub fn from_record(record: &QuestionRecord) -> Self {
        let mut fragment = Self {
            record_id: record.id.clone(),
            kind: record.kind(),
            prompt: record.prompt.clone(),
            options: Vec::new(),
            fill_in_answer: String::new(),
            rationale: record.rationale.clone(),
            hint: record.hint.clone(),
        };
        match record.body.options() {
            Some(options) => fragment.rebuild_options(options, &record.body),
            None => {
                if let QuestionBody::FillIn { answer } = &record.body {
                    fragment.fill_in_answer = answer.clone();
                }
            }
        }
        fragment
    }

    /// Rebuild the option rows for a new options list, re-deriving each
    /// row's selection and rank from the current rows by text equality.
    ///
    /// Text equality, not position: options may have been reordered or
    /// edited in place, and a row keeps its mark only if an equal text is
    /// still present.
    pub fn set_options(&mut self, options: &[String]) {
        if !self.kind.has_options() {
            return;
        }
        let previous = std::mem::take(&mut self.options);
        self.options = options
            .iter()
            .map(|text| {
                let mut slot = OptionSlot::new(text.clone());
                if let Some(old) = previous.iter().find(|prev| prev.text == *text) {
                    slot.selected = old.selected;
                    slot.rank = old.rank.clone();
                }
                slot
            })
            .collect();
        self.ensure_option_slot();
    }

    /// Rebuild the answer sub-section from answer data, pre-selecting and
    /// pre-ordering rows by text equality.
    pub fn set_answer(&mut self, body: &QuestionBody) {
        match body {
            QuestionBody::SingleChoice { answer, .. } => {
                for slot in &mut self.options {
                    slot.selected = answer.as_deref() == Some(slot.text.as_str());
                }
            }
            QuestionBody::MultiSelect { answer, .. } => {
                for slot in &mut self.options {
                    slot.selected = answer.contains(&slot.text);
                }
            }
            QuestionBody::Ordering { answer, .. } => {
                for slot in &mut self.options {
                    slot.rank = answer
                        .iter()
                        .position(|value| *value == slot.text)
                        .map(|index| (index + 1).to_string())
                        .unwrap_or_default();
                }
            }
            QuestionBody::FillIn { answer } => {
                self.fill_in_answer = answer.clone();
            }
        }
    }

    /// Append an empty option row.
    pub fn add_option_slot(&mut self) {
        if self.kind.has_options() {
            self.options.push(OptionSlot::default());
        }
    }

    /// Remove an option row. The last remaining row cannot be removed;
    /// returns whether a removal occurred.
    pub fn remove_option_slot(&mut self, index: usize) -> bool {
        if !self.can_remove_option() || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }

    /// True while more than one option row exists. The remove control for
    /// a lone row is hidden.
    pub fn can_remove_option(&self) -> bool {
        self.options.len() > 1
    }

    /// Read the current field values back into a canonical record.
    ///
    /// Total over malformed intermediate states: empty texts stay in the
    /// options list, selections referencing empty texts are dropped, and
    /// unparsable ranks fall back to [`RANK_FALLBACK`]. The rank sort is
    /// stable, so ties keep display order.
    pub fn read_record(&self) -> QuestionRecord {
        let options: Vec<String> = self.options.iter().map(|slot| slot.text.clone()).collect();
        let body = match self.kind {
            QuestionKind::SingleChoice => QuestionBody::SingleChoice {
                options,
                answer: self
                    .options
                    .iter()
                    .find(|slot| slot.selected && !slot.text.is_empty())
                    .map(|slot| slot.text.clone()),
            },
            QuestionKind::MultiSelect => QuestionBody::MultiSelect {
                options,
                answer: self
                    .options
                    .iter()
                    .filter(|slot| slot.selected && !slot.text.is_empty())
                    .map(|slot| slot.text.clone())
                    .collect(),
            },
            QuestionKind::Ordering => {
                let mut ranked: Vec<&OptionSlot> = self
                    .options
                    .iter()
                    .filter(|slot| !slot.text.trim().is_empty())
                    .collect();
                ranked.sort_by_key(|slot| slot.parsed_rank());
                QuestionBody::Ordering {
                    options,
                    answer: ranked.into_iter().map(|slot| slot.text.clone()).collect(),
                }
            }
            QuestionKind::FillIn => QuestionBody::FillIn {
                answer: self.fill_in_answer.clone(),
            },
        };
        QuestionRecord {
            id: self.record_id.clone(),
            prompt: self.prompt.clone(),
            body,
            rationale: self.rationale.clone(),
            hint: self.hint.clone(),
        }
    }

    fn rebuild_options(&mut self, options: &[String], body: &QuestionBody) {
        self.options = options.iter().map(|text| OptionSlot::new(text.clone())).collect();
        self.set_answer(body);
        self.ensure_option_slot();
    }

    fn ensure_option_slot(&mut self) {
        if self.kind.has_options() && self.options.is_empty() {
            self.options.push(OptionSlot::default());
        }
    }
}
