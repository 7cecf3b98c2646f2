//! Command implementations shared by the binary and its tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use qbank_ingest::SourceFile;
use qbank_session::{EditorSession, ImportSummary, MemorySnapshotStore};

/// A question set loaded from disk, ready to validate or export.
pub struct LoadedSet {
    pub session: EditorSession<MemorySnapshotStore>,
    pub summary: ImportSummary,
}

/// Read the given files and merge them into one editor session.
///
/// Unreadable paths abort immediately; unparseable file contents are
/// collected per file and the rest of the batch is kept, matching the
/// editor's import behavior.
pub fn load_set(paths: &[PathBuf]) -> Result<LoadedSet> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(SourceFile::from_path(path)?);
    }
    let mut session = EditorSession::start(MemorySnapshotStore::new());
    let summary = session
        .import(&files)
        .context("no usable question records in the given files")?;
    info!(
        files = paths.len(),
        imported = summary.imported,
        skipped = summary.skipped_records,
        "loaded question set"
    );
    Ok(LoadedSet { session, summary })
}

/// Where a merged export landed.
pub struct MergeOutcome {
    pub path: PathBuf,
    pub questions: usize,
}

/// Export an already-loaded set to `output`, or to the derived filename
/// in the current directory when no path is given.
///
/// Export is gated exactly like the editor's save action: a set that
/// fails validation is refused with [`qbank_session::SessionError::ExportBlocked`].
pub fn write_merged(set: &LoadedSet, output: Option<&Path>) -> Result<MergeOutcome> {
    let payload = set.session.export()?;
    let path = output.map_or_else(|| PathBuf::from(&payload.filename), Path::to_path_buf);
    std::fs::write(&path, &payload.bytes)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(MergeOutcome {
        path,
        questions: set.session.question_count(),
    })
}
