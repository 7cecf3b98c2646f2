use tracing::{info, warn};

use qbank_form::FormFragment;
use qbank_ingest::{ImportOutcome, SourceFile, export_filename, export_set, import_files};
use qbank_model::{
    QuestionId, QuestionKind, QuestionRecord, SetMetadata, WireQuestion,
};
use qbank_preview::PreviewFragment;
use qbank_store::{IdAllocator, QuestionStore};
use qbank_validate::{RecordReport, SetReport, validate_record, validate_set};

use crate::error::{Result, SessionError};
use crate::generator::{GenerationRequest, GenerationResponse, QuestionGenerator};
use crate::snapshot::{Snapshot, SnapshotStore};

/// The serialized set ready to be handed to the save dialog.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// What an import batch produced, for the status line.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_records: usize,
    pub failed_files: Vec<String>,
}

/// The coordinating layer of the editor.
///
/// Owns the question store and set metadata, and is the only component
/// that calls the form, validation, preview, ingest, and persistence
/// services. Every mutating operation goes through here, updates the
/// store first, and finishes by autosaving a snapshot — the projections
/// (fragments, reports, previews) are recomputed from the store on
/// demand and never independently mutated.
pub struct EditorSession<S: SnapshotStore> {
    store: QuestionStore,
    metadata: SetMetadata,
    previewed: Option<QuestionId>,
    generation_in_flight: bool,
    snapshots: S,
}

impl<S: SnapshotStore> EditorSession<S> {
    /// Start a session, restoring the autosaved snapshot when one is
    /// present and structurally valid, otherwise seeding a fresh set with
    /// a single empty question.
    pub fn start(snapshots: S) -> Self {
        let mut session = Self {
            store: QuestionStore::new(),
            metadata: SetMetadata::default(),
            previewed: None,
            generation_in_flight: false,
            snapshots,
        };
        match session.snapshots.load() {
            Some(snapshot) if snapshot.is_restorable() => {
                info!(
                    questions = snapshot.questions.len(),
                    "restoring autosaved question set"
                );
                session.restore(snapshot);
            }
            Some(_) => {
                warn!("autosaved snapshot is not restorable, starting fresh");
                session.seed_empty_question();
            }
            None => session.seed_empty_question(),
        }
        session
    }

    // === Question lifecycle ===

    /// Append a fresh empty question and return its ID.
    pub fn add_question(&mut self) -> QuestionId {
        let id = self.store.allocate_id();
        self.store.add(QuestionRecord::new(id.clone()));
        self.autosave();
        id
    }

    /// Remove a question. The last remaining record cannot be removed.
    pub fn remove_question(&mut self, id: &QuestionId) -> Result<()> {
        if self.store.len() <= 1 {
            warn!(%id, "refusing to remove the last question");
            return Err(SessionError::LastQuestion);
        }
        if !self.store.remove(id) {
            return Err(SessionError::UnknownQuestion(id.clone()));
        }
        if self.previewed.as_ref() == Some(id) {
            self.previewed = None;
        }
        self.autosave();
        Ok(())
    }

    /// Commit the current values of an edited fragment back into the
    /// store and return the record's fresh validation report.
    ///
    /// The answer is repaired on the way in, so option edits can never
    /// leave a dangling answer reference behind.
    pub fn commit_fragment(&mut self, fragment: &FormFragment) -> Result<RecordReport> {
        if !self.store.contains(&fragment.record_id) {
            return Err(SessionError::UnknownQuestion(fragment.record_id.clone()));
        }
        let mut record = fragment.read_record();
        record.body.repair_answer();
        self.store.update(&fragment.record_id, record.clone());
        self.autosave();
        Ok(validate_record(&record))
    }

    /// Append an empty option to a question.
    pub fn add_option(&mut self, id: &QuestionId) -> Result<()> {
        let mut record = self.question_or_err(id)?;
        let Some(options) = record.body.options() else {
            return Ok(()); // fill-in has no options section
        };
        let mut options = options.to_vec();
        options.push(String::new());
        record.body.set_options(options);
        self.store.update(id, record);
        self.autosave();
        Ok(())
    }

    /// Remove an option by display index. The last option of a record is
    /// kept; answer references to the removed text are repaired away.
    pub fn remove_option(&mut self, id: &QuestionId, index: usize) -> Result<()> {
        let mut record = self.question_or_err(id)?;
        let Some(options) = record.body.options() else {
            return Ok(());
        };
        if options.len() <= 1 {
            warn!(%id, "refusing to remove the last option");
            return Err(SessionError::LastOption);
        }
        if index >= options.len() {
            return Ok(());
        }
        let mut options = options.to_vec();
        options.remove(index);
        record.body.set_options(options);
        self.store.update(id, record);
        self.autosave();
        Ok(())
    }

    /// Change a question's kind, migrating what carries over.
    pub fn change_kind(&mut self, id: &QuestionId, kind: QuestionKind) -> Result<()> {
        let mut record = self.question_or_err(id)?;
        record.body = record.body.convert_to(kind);
        self.store.update(id, record);
        self.autosave();
        Ok(())
    }

    // === Metadata ===

    pub fn metadata(&self) -> &SetMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: SetMetadata) {
        self.metadata = metadata;
        self.autosave();
    }

    // === Read-side projections ===

    pub fn question(&self, id: &QuestionId) -> Option<QuestionRecord> {
        self.store.get(id)
    }

    pub fn questions(&self) -> Vec<QuestionRecord> {
        self.store.get_all()
    }

    pub fn question_count(&self) -> usize {
        self.store.len()
    }

    /// The editable fragment for a question.
    pub fn fragment(&self, id: &QuestionId) -> Option<FormFragment> {
        self.store.get(id).map(|record| FormFragment::from_record(&record))
    }

    /// Validation of the whole set; export gating reads this.
    pub fn validation(&self) -> SetReport {
        validate_set(&self.metadata, &self.store.get_all())
    }

    /// Select which question the preview pane shows.
    pub fn set_previewed(&mut self, id: Option<QuestionId>) {
        self.previewed = match id {
            Some(id) if self.store.contains(&id) => Some(id),
            _ => None,
        };
    }

    /// The preview of the currently selected question, if any.
    pub fn preview(&self) -> Option<PreviewFragment> {
        let id = self.previewed.as_ref()?;
        self.store.get(id).map(|record| qbank_preview::render(&record))
    }

    // === File boundary ===

    /// Replace the current set with the contents of an import batch.
    ///
    /// All files are processed even when some fail; imported IDs are
    /// discarded (but observed, so later allocations cannot collide) and
    /// every record gets a freshly allocated ID. Metadata comes from the
    /// first file that supplied any.
    pub fn import(&mut self, files: &[SourceFile]) -> Result<ImportSummary> {
        let outcome = import_files(files)?;
        self.snapshots.clear();
        self.apply_import(&outcome);
        self.autosave();
        Ok(ImportSummary {
            imported: self.store.len(),
            skipped_records: outcome.skipped_records,
            failed_files: outcome
                .failed_files
                .iter()
                .map(|(name, _)| name.clone())
                .collect(),
        })
    }

    /// Serialize the set for saving, gated strictly on aggregate
    /// validity. A failing set is refused, never crashed on.
    pub fn export(&self) -> Result<ExportPayload> {
        let report = self.validation();
        if !report.export_allowed() {
            return Err(SessionError::ExportBlocked {
                issues: report.issue_count(),
            });
        }
        let bytes = export_set(&self.metadata, &self.store.get_all())
            .map_err(SessionError::Export)?;
        Ok(ExportPayload {
            filename: export_filename(&self.metadata),
            bytes,
        })
    }

    /// Discard everything and start a fresh set with one empty question.
    pub fn new_set(&mut self) {
        self.snapshots.clear();
        self.metadata = SetMetadata::default();
        self.previewed = None;
        self.store = QuestionStore::new();
        self.seed_empty_question();
    }

    // === Generation boundary ===

    /// True while a generation request is outstanding; the triggering
    /// control stays disabled for the duration.
    pub fn generation_in_flight(&self) -> bool {
        self.generation_in_flight
    }

    /// Mark a generation request as started. Fails when one is already
    /// outstanding — there is never more than one concurrent submission.
    pub fn begin_generation(&mut self) -> Result<()> {
        if self.generation_in_flight {
            return Err(SessionError::GenerationInFlight);
        }
        self.generation_in_flight = true;
        Ok(())
    }

    /// Apply a generation response and re-enable the control.
    ///
    /// On success every returned record is appended under a freshly
    /// allocated ID. On failure, or when any returned record is
    /// malformed, nothing is committed and the message surfaces verbatim.
    pub fn finish_generation(&mut self, response: &GenerationResponse) -> Result<usize> {
        self.generation_in_flight = false;
        if !response.success {
            let message = response
                .message
                .clone()
                .unwrap_or_else(|| "the generation backend reported an error".to_string());
            return Err(SessionError::GenerationFailed(message));
        }

        // Shape-check the whole batch before committing anything.
        let mut incoming = Vec::with_capacity(response.questions.len());
        for value in &response.questions {
            let question = WireQuestion::from_value(value)
                .and_then(|question| {
                    question.kind.parse::<QuestionKind>()?;
                    Ok(question)
                })
                .map_err(|error| SessionError::GenerationFailed(error.to_string()))?;
            incoming.push(question);
        }

        let added = incoming.len();
        for question in incoming {
            if let Ok(external) = QuestionId::new(question.id.clone()) {
                self.store.note_external_id(&external);
            }
            let id = self.store.allocate_id();
            match question.into_record(id) {
                Ok(record) => {
                    self.store.add(record);
                }
                Err(error) => {
                    // Unreachable after the shape check, kept as a guard.
                    return Err(SessionError::GenerationFailed(error.to_string()));
                }
            }
        }
        self.autosave();
        info!(added, "appended generated questions");
        Ok(added)
    }

    /// Drive a blocking generation collaborator end to end.
    pub fn generate(
        &mut self,
        generator: &dyn QuestionGenerator,
        request: &GenerationRequest,
    ) -> Result<usize> {
        self.begin_generation()?;
        match generator.generate(request) {
            Ok(response) => self.finish_generation(&response),
            Err(error) => {
                self.generation_in_flight = false;
                Err(SessionError::GenerationFailed(error.to_string()))
            }
        }
    }

    // === Internals ===

    fn question_or_err(&self, id: &QuestionId) -> Result<QuestionRecord> {
        self.store
            .get(id)
            .ok_or_else(|| SessionError::UnknownQuestion(id.clone()))
    }

    fn seed_empty_question(&mut self) {
        let id = self.store.allocate_id();
        self.store.add(QuestionRecord::new(id));
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.metadata = snapshot.metadata;
        // Snapshot IDs are our own earlier allocations and are kept; any
        // unusable one gets a replacement that cannot collide with the
        // kept ones.
        let parsed: Vec<(Option<QuestionId>, WireQuestion)> = snapshot
            .questions
            .into_iter()
            .map(|question| (QuestionId::new(question.id.clone()).ok(), question))
            .collect();
        let mut allocator =
            IdAllocator::seeded_from(parsed.iter().filter_map(|(id, _)| id.as_ref()));
        for (id, question) in parsed {
            let id = id.unwrap_or_else(|| allocator.allocate());
            match question.into_record(id) {
                // `add` collapses duplicate IDs with a warning, so a
                // corrupted snapshot cannot restore two records under the
                // same ID.
                Ok(record) => {
                    self.store.add(record);
                }
                Err(error) => warn!(%error, "dropping unrestorable snapshot record"),
            }
        }
        if self.store.is_empty() {
            self.seed_empty_question();
        }
    }

    fn apply_import(&mut self, outcome: &ImportOutcome) {
        self.metadata = outcome.metadata.clone().unwrap_or_default();
        self.previewed = None;
        self.store = QuestionStore::new();
        for question in &outcome.questions {
            if let Ok(external) = QuestionId::new(question.id.clone()) {
                self.store.note_external_id(&external);
            }
            let id = self.store.allocate_id();
            match question.clone().into_record(id) {
                Ok(record) => {
                    self.store.add(record);
                }
                Err(error) => warn!(%error, "dropping unconvertible imported record"),
            }
        }
        if self.store.is_empty() {
            self.seed_empty_question();
        }
    }

    /// Persist the current state. Failures are logged and swallowed —
    /// autosave must never interrupt editing.
    fn autosave(&mut self) {
        let snapshot = Snapshot::new(
            self.metadata.clone(),
            self.store
                .get_all()
                .iter()
                .map(WireQuestion::from_record)
                .collect(),
        );
        if let Err(error) = self.snapshots.save(&snapshot) {
            warn!(%error, "autosave failed");
        }
    }
}
