//! Editor session coordination.
//!
//! [`EditorSession`] is the single coordinating layer of the editor: it
//! owns the question store and set metadata, drives every edit through
//! the store, recomputes the derived projections (form fragments,
//! validation reports, previews) on demand, and talks to the external
//! collaborators — the autosave slot ([`SnapshotStore`]) and the
//! AI-generation backend ([`QuestionGenerator`]) — through narrow traits.
//!
//! Everything is single-threaded and synchronous: each edit updates the
//! store before the next one is processed, so field edits apply in the
//! order the user produced them.

mod error;
mod generator;
mod session;
mod snapshot;

pub use error::{Result, SessionError};
pub use generator::{
    DocumentPayload, GenerationRequest, GenerationResponse, QuestionGenerator,
};
pub use session::{EditorSession, ExportPayload, ImportSummary};
pub use snapshot::{
    FileSnapshotStore, MemorySnapshotStore, SNAPSHOT_VERSION, Snapshot, SnapshotStore,
};
