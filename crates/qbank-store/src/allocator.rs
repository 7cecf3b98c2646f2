use qbank_model::QuestionId;

/// Monotonic ID allocator, scoped to one open question set.
///
/// The counter only ever moves forward within a session, so IDs are never
/// reused even after a record is deleted. Externally supplied IDs are fed
/// through [`IdAllocator::observe`] so a later allocation can never
/// collide with them.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocator positioned after the highest numeric suffix in `ids`.
    pub fn seeded_from<'a>(ids: impl IntoIterator<Item = &'a QuestionId>) -> Self {
        let mut allocator = Self::new();
        for id in ids {
            allocator.observe(id);
        }
        allocator
    }

    /// Issue a fresh ID and advance the counter.
    pub fn allocate(&mut self) -> QuestionId {
        let id = QuestionId::from_counter(self.next);
        self.next += 1;
        id
    }

    /// Advance the counter past an externally supplied ID's numeric
    /// suffix, if it has one.
    pub fn observe(&mut self, id: &QuestionId) {
        if let Some(suffix) = id.numeric_suffix()
            && suffix >= self.next
        {
            self.next = suffix + 1;
        }
    }

    /// The counter value the next allocation will use.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_sequential_ids() {
        let mut allocator = IdAllocator::new();
        assert_eq!(allocator.allocate().as_str(), "q_1");
        assert_eq!(allocator.allocate().as_str(), "q_2");
    }

    #[test]
    fn observe_advances_past_external_suffixes() {
        let mut allocator = IdAllocator::new();
        allocator.observe(&QuestionId::new("q_5").unwrap());
        assert_eq!(allocator.allocate().as_str(), "q_6");
        // Lower and non-numeric suffixes never move the counter back.
        allocator.observe(&QuestionId::new("q_2").unwrap());
        allocator.observe(&QuestionId::new("intro").unwrap());
        assert_eq!(allocator.allocate().as_str(), "q_7");
    }

    #[test]
    fn seeded_from_starts_past_the_maximum() {
        let ids = vec![
            QuestionId::new("q_3").unwrap(),
            QuestionId::new("item12").unwrap(),
            QuestionId::new("intro").unwrap(),
        ];
        let mut allocator = IdAllocator::seeded_from(&ids);
        assert_eq!(allocator.allocate().as_str(), "q_13");
    }
}
