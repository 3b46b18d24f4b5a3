//! The upload → mapping → preview → commit state machine.

use std::mem;

use tracing::{debug, info, warn};

use grc_ingest::{SourceText, extract_headers, fetch_google_sheet, read_source};
use grc_map::{MappingCache, MappingStore, auto_map_fields};
use grc_model::{FieldMapping, ImportResult, RawTable};
use grc_validate::{error_summary, validate_rows};

use crate::error::WorkflowError;
use crate::sink::BulkInserter;

/// The workflow step, as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Upload,
    Mapping,
    Preview,
    Done,
}

impl WorkflowState {
    fn name(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Mapping => "mapping",
            Self::Preview => "preview",
            Self::Done => "done",
        }
    }
}

/// Workflow data while the operator adjusts the column mapping.
#[derive(Debug, Clone)]
pub struct MappingStage {
    pub source: RawTable,
    pub headers: Vec<String>,
    pub mapping: FieldMapping,
    /// True when the mapping was seeded from the store instead of the
    /// auto-mapper.
    pub from_cache: bool,
}

/// Workflow data while the operator reviews the validation result.
#[derive(Debug, Clone)]
pub struct PreviewStage {
    pub source: RawTable,
    pub headers: Vec<String>,
    pub mapping: FieldMapping,
    pub result: ImportResult,
}

/// Counts surfaced to the operator before commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSummary {
    pub total_count: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Error-type frequencies, duplicate-code errors collapsed into one
    /// bucket.
    pub errors: Vec<(String, usize)>,
}

/// What a completed commit imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    pub imported: usize,
    /// Invalid rows left unimported. Partial success is the normal outcome,
    /// not an exceptional one.
    pub skipped: usize,
}

enum Stage {
    Upload,
    Mapping(MappingStage),
    Preview(PreviewStage),
    Done(CommitOutcome),
}

/// Sequences the import pipeline and talks to the collaborators.
///
/// Exactly one ingestion can be underway: starting a new one anywhere but the
/// `Upload` step is refused. The mapping cache and the bulk inserter are
/// injected capabilities, never ambient state.
pub struct ImportWorkflow<C: MappingCache, S: BulkInserter> {
    store: MappingStore<C>,
    sink: S,
    stage: Stage,
}

impl<C: MappingCache, S: BulkInserter> ImportWorkflow<C, S> {
    pub fn new(cache: C, sink: S) -> Self {
        Self {
            store: MappingStore::new(cache),
            sink,
            stage: Stage::Upload,
        }
    }

    #[must_use]
    pub fn state(&self) -> WorkflowState {
        match &self.stage {
            Stage::Upload => WorkflowState::Upload,
            Stage::Mapping(_) => WorkflowState::Mapping,
            Stage::Preview(_) => WorkflowState::Preview,
            Stage::Done(_) => WorkflowState::Done,
        }
    }

    #[must_use]
    pub fn mapping_stage(&self) -> Option<&MappingStage> {
        match &self.stage {
            Stage::Mapping(stage) => Some(stage),
            _ => None,
        }
    }

    #[must_use]
    pub fn preview_stage(&self) -> Option<&PreviewStage> {
        match &self.stage {
            Stage::Preview(stage) => Some(stage),
            _ => None,
        }
    }

    #[must_use]
    pub fn commit_outcome(&self) -> Option<CommitOutcome> {
        match &self.stage {
            Stage::Done(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// Ingests a dropped or picked file and advances to the mapping step.
    pub fn ingest_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), WorkflowError> {
        self.require_upload("ingest a file")?;
        let source = read_source(file_name, bytes)?;
        self.begin_mapping(source)
    }

    /// Ingests a public Google Sheet and advances to the mapping step.
    pub fn ingest_google_sheet(&mut self, url: &str) -> Result<(), WorkflowError> {
        self.require_upload("ingest a sheet")?;
        let source = fetch_google_sheet(url)?;
        self.begin_mapping(source)
    }

    fn require_upload(&self, action: &'static str) -> Result<(), WorkflowError> {
        match self.stage {
            Stage::Upload => Ok(()),
            _ => Err(self.invalid_transition(action)),
        }
    }

    fn begin_mapping(&mut self, source: SourceText) -> Result<(), WorkflowError> {
        let info = extract_headers(&source.text);
        if info.headers.is_empty() {
            return Err(WorkflowError::NoHeaders);
        }

        let cached = self.store.load(&info.headers);
        let from_cache = cached.is_some();
        let mapping = cached.unwrap_or_else(|| auto_map_fields(&info.headers));
        debug!(
            source = %source.name,
            headers = info.headers.len(),
            from_cache,
            "entering mapping step"
        );

        self.stage = Stage::Mapping(MappingStage {
            source: RawTable::new(source.name, info.delimiter, source.text),
            headers: info.headers,
            mapping,
            from_cache,
        });
        Ok(())
    }

    /// Replaces the working mapping with the operator's edits.
    pub fn set_mapping(&mut self, mapping: FieldMapping) -> Result<(), WorkflowError> {
        match &mut self.stage {
            Stage::Mapping(stage) => {
                stage.mapping = mapping;
                Ok(())
            }
            _ => Err(self.invalid_transition("edit the mapping")),
        }
    }

    /// Runs the validator and advances to the preview step.
    ///
    /// A structurally insufficient mapping surfaces the error and stays in
    /// the mapping step. With `remember`, the confirmed mapping is persisted
    /// for this header set; a failed save is a silent no-op.
    pub fn confirm_mapping(&mut self, remember: bool) -> Result<(), WorkflowError> {
        let stage = match mem::replace(&mut self.stage, Stage::Upload) {
            Stage::Mapping(stage) => stage,
            other => {
                self.stage = other;
                return Err(self.invalid_transition("confirm the mapping"));
            }
        };

        match validate_rows(&stage.source.text, &stage.mapping, stage.source.delimiter) {
            Ok(result) => {
                if remember {
                    self.store.save(&stage.headers, &stage.mapping);
                }
                info!(
                    total = result.total_count,
                    valid = result.valid_count,
                    "mapping confirmed"
                );
                self.stage = Stage::Preview(PreviewStage {
                    source: stage.source,
                    headers: stage.headers,
                    mapping: stage.mapping,
                    result,
                });
                Ok(())
            }
            Err(err) => {
                self.stage = Stage::Mapping(stage);
                Err(err.into())
            }
        }
    }

    /// Discards the preview and returns to the mapping step, re-seeded from
    /// the mapping that produced this preview (not from the auto-mapper).
    pub fn back_to_mapping(&mut self) -> Result<(), WorkflowError> {
        let stage = match mem::replace(&mut self.stage, Stage::Upload) {
            Stage::Preview(stage) => stage,
            other => {
                self.stage = other;
                return Err(self.invalid_transition("return to mapping"));
            }
        };
        self.stage = Stage::Mapping(MappingStage {
            source: stage.source,
            headers: stage.headers,
            mapping: stage.mapping,
            from_cache: false,
        });
        Ok(())
    }

    /// Discards everything and returns to the upload step.
    pub fn back_to_upload(&mut self) -> Result<(), WorkflowError> {
        match self.stage {
            Stage::Mapping(_) | Stage::Preview(_) => {
                self.stage = Stage::Upload;
                Ok(())
            }
            _ => Err(self.invalid_transition("return to upload")),
        }
    }

    /// Aborts the workflow from any step. No partial writes exist to undo.
    pub fn cancel(&mut self) {
        self.stage = Stage::Upload;
    }

    /// The pre-commit display: counts plus the error-type frequency summary.
    #[must_use]
    pub fn preview_summary(&self) -> Option<PreviewSummary> {
        let stage = self.preview_stage()?;
        Some(PreviewSummary {
            total_count: stage.result.total_count,
            valid_count: stage.result.valid_count,
            invalid_count: stage.result.invalid_count,
            errors: error_summary(&stage.result),
        })
    }

    /// Commits the valid subset in one batch.
    ///
    /// Refused when nothing is valid. On transport failure the workflow stays
    /// in the preview step with the computed result intact, so the commit can
    /// be retried without re-validation.
    pub fn commit(&mut self, collection: &str) -> Result<CommitOutcome, WorkflowError> {
        let stage = match &self.stage {
            Stage::Preview(stage) => stage,
            _ => return Err(self.invalid_transition("commit")),
        };
        if stage.result.valid_count == 0 {
            return Err(WorkflowError::NothingToCommit);
        }

        let records = stage.result.valid_controls();
        if let Err(err) = self.sink.insert_batch(collection, &records) {
            warn!(error = %err, "bulk insert failed; preview retained for retry");
            return Err(WorkflowError::Commit(err));
        }

        let outcome = CommitOutcome {
            imported: records.len(),
            skipped: stage.result.invalid_count,
        };
        info!(
            imported = outcome.imported,
            skipped = outcome.skipped,
            collection,
            "import committed"
        );
        self.stage = Stage::Done(outcome);
        Ok(outcome)
    }

    fn invalid_transition(&self, action: &'static str) -> WorkflowError {
        WorkflowError::InvalidTransition {
            state: self.state().name(),
            action,
        }
    }
}
