//! Field and set level validation of question banks.
//!
//! Validation never throws: user-input problems are per-field flags on a
//! [`RecordReport`] or [`SetReport`], and the aggregate report gates the
//! export action. A failing set refuses to export; it never crashes.

mod report;
mod rules;

pub use report::{FieldRef, RecordReport, SetReport, ValidationIssue};
pub use rules::{
    MIN_VALID_OPTIONS, codes, validate_fragment, validate_metadata, validate_record, validate_set,
};
