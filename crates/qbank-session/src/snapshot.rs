//! Autosave snapshot boundary.
//!
//! The editor writes a versioned snapshot after every mutating action and
//! restores it on the next launch. The slot itself (browser localStorage,
//! a file on disk, an in-memory map in tests) is behind [`SnapshotStore`];
//! write failures are the caller's to log and swallow — autosave is
//! best-effort by contract.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use qbank_model::{SetMetadata, WireQuestion};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The autosaved editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub metadata: SetMetadata,
    pub questions: Vec<WireQuestion>,
}

impl Snapshot {
    pub fn new(metadata: SetMetadata, questions: Vec<WireQuestion>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            metadata,
            questions,
        }
    }

    /// Structural validity check used before restoring.
    pub fn is_restorable(&self) -> bool {
        self.version == SNAPSHOT_VERSION && !self.questions.is_empty()
    }
}

/// A key-value slot the snapshot lives in.
pub trait SnapshotStore {
    /// The stored snapshot, or None when absent or unreadable.
    fn load(&self) -> Option<Snapshot>;

    /// Persist the snapshot. Failures (e.g. quota exceeded) are returned
    /// for logging but must not interrupt the edit.
    fn save(&mut self, snapshot: &Snapshot) -> anyhow::Result<()>;

    /// Drop the stored snapshot, if any.
    fn clear(&mut self);
}

/// In-memory snapshot slot, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slot: Option<Snapshot>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Option<Snapshot> {
        self.slot.clone()
    }

    fn save(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        self.slot = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&mut self) {
        self.slot = None;
    }
}

/// JSON-file-backed snapshot slot for desktop sessions.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Option<Snapshot> {
        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(error) => {
                debug!(path = %self.path.display(), %error, "ignoring unreadable snapshot");
                None
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec(snapshot)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }

    fn clear(&mut self) {
        // A missing file is already the cleared state.
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileSnapshotStore::new(dir.path().join("autosave.json"));
        assert!(store.load().is_none());

        let snapshot = Snapshot::new(SetMetadata::default(), vec![WireQuestion::default()]);
        store.save(&snapshot).expect("save snapshot");
        assert_eq!(store.load(), Some(snapshot));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn unreadable_snapshot_files_load_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("autosave.json");
        std::fs::write(&path, b"{broken").expect("write garbage");
        let store = FileSnapshotStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn version_gate_blocks_restore() {
        let mut snapshot = Snapshot::new(SetMetadata::default(), vec![WireQuestion::default()]);
        assert!(snapshot.is_restorable());
        snapshot.version = 2;
        assert!(!snapshot.is_restorable());
    }
}
