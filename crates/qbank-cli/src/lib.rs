//! CLI library components for the question-bank tool.

pub mod logging;
pub mod ops;
