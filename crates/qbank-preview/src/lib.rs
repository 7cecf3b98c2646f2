//! Read-only preview projection of question records.
//!
//! [`render`] turns a record into the rendition a learner would see in
//! the quiz-taking application: correct answers highlighted, ordering
//! questions shown in solved order, and an explicit error state instead
//! of an empty or crashing view for unrenderable records.

mod render;

pub use render::{
    ANSWER_UNSET_CAPTION, OrderingItem, PreviewBody, PreviewFragment, PreviewOption, render,
};
