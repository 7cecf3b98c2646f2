//! Question-set file import and export.
//!
//! This crate is the byte boundary of the editor: raw file bytes in,
//! shape-checked wire records out, and the reverse for export. File
//! pickers and dialogs live outside; the CLI and a desktop shell both sit
//! on this same surface.
//!
//! Import is batch-oriented and recovers locally: an unreadable file or a
//! malformed record is skipped with a logged warning and the rest of the
//! batch continues. Only a batch that yields zero usable records is a
//! user-visible failure.

mod error;
mod export;
mod import;

pub use error::{IngestError, Result};
pub use export::{export_filename, export_set};
pub use import::{ImportOutcome, ParsedFile, SourceFile, import_files, parse_file};
