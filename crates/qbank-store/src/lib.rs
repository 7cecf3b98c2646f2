//! Canonical question collection and ID allocation.
//!
//! [`QuestionStore`] owns the ordered set of question records for one open
//! question set; [`IdAllocator`] issues the monotonically increasing IDs.
//! Every read handed to a caller is a defensive copy, so no aliasing
//! hazards arise even though nothing enforces exclusivity at runtime.

mod allocator;
mod store;

pub use allocator::IdAllocator;
pub use store::{AddOutcome, QuestionStore};
