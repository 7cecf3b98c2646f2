//! Canonical data model for quiz question banks.
//!
//! The [`QuestionRecord`] is the single source of truth the editor works
//! on; the form fragment, validation report, and preview are all pure
//! projections of it. The [`wire`] module holds the JSON schema shared
//! with the quiz-taking application.

pub mod error;
pub mod ids;
pub mod kind;
pub mod metadata;
pub mod record;
pub mod wire;

pub use error::{ModelError, Result};
pub use ids::QuestionId;
pub use kind::QuestionKind;
pub use metadata::{SetMetadata, UNKNOWN_METADATA};
pub use record::{HINT_PLACEHOLDERS, QuestionBody, QuestionRecord, hint_is_placeholder};
pub use wire::{WireDocument, WireQuestion};
