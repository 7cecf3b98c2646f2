use qbank_model::{QuestionId, QuestionRecord};
use tracing::warn;

use crate::allocator::IdAllocator;

/// How [`QuestionStore::add`] resolved an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The record was appended at the end of the collection.
    Appended,
    /// A record with the same ID already existed and was replaced in place.
    Replaced,
}

/// Owner of the canonical ordered question collection.
///
/// The store is the single source of truth: every accessor hands out an
/// independent copy, so callers can never alias or mutate internal state.
/// All mutation goes through the store's own operations.
#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    records: Vec<QuestionRecord>,
    allocator: IdAllocator,
}

impl QuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh unique ID, advancing the allocator.
    pub fn allocate_id(&mut self) -> QuestionId {
        self.allocator.allocate()
    }

    /// Advance the allocator past an untrusted external ID without
    /// storing it. Used when imported IDs are discarded and replaced, so
    /// later allocations can never collide with the originals.
    pub fn note_external_id(&mut self, id: &QuestionId) {
        self.allocator.observe(id);
    }

    /// Insert a record. If a record with the same ID already exists it is
    /// replaced in place (warned) rather than duplicated. The allocator is
    /// advanced past the record's numeric suffix to defend against
    /// externally supplied IDs.
    pub fn add(&mut self, record: QuestionRecord) -> AddOutcome {
        self.allocator.observe(&record.id);
        if let Some(existing) = self.position(&record.id) {
            warn!(id = %record.id, "add: duplicate question id, replacing existing record");
            self.records[existing] = record;
            AddOutcome::Replaced
        } else {
            self.records.push(record);
            AddOutcome::Appended
        }
    }

    /// Remove the record with the given ID. Returns whether a removal
    /// occurred.
    pub fn remove(&mut self, id: &QuestionId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// A deep, independent copy of the record with the given ID.
    pub fn get(&self, id: &QuestionId) -> Option<QuestionRecord> {
        self.position(id).map(|index| self.records[index].clone())
    }

    /// Deep copies of every record, in insertion order.
    pub fn get_all(&self) -> Vec<QuestionRecord> {
        self.records.clone()
    }

    /// Replace the record stored under `id`. If the new record carries a
    /// different ID the stored ID wins: the record is pinned to the lookup
    /// key and the mismatch is warned. Unknown IDs are a warned no-op;
    /// returns whether the update was applied.
    pub fn update(&mut self, id: &QuestionId, mut record: QuestionRecord) -> bool {
        let Some(index) = self.position(id) else {
            warn!(id = %id, "update: no record with this id, ignoring");
            return false;
        };
        if record.id != *id {
            warn!(
                stored = %id,
                submitted = %record.id,
                "update: record id mismatch, pinning to stored id"
            );
            record.id = id.clone();
        }
        self.records[index] = record;
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.position(id).is_some()
    }

    /// IDs of all live records, in insertion order.
    pub fn ids(&self) -> Vec<QuestionId> {
        self.records.iter().map(|record| record.id.clone()).collect()
    }

    fn position(&self, id: &QuestionId) -> Option<usize> {
        self.records.iter().position(|record| record.id == *id)
    }
}
