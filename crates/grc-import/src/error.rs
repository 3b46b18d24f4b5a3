use thiserror::Error;

use grc_ingest::IngestError;
use grc_validate::ValidateError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// File-level failure while reading or fetching a source.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The file parsed but yielded no usable header row.
    #[error("no headers detected; the file cannot be imported")]
    NoHeaders,

    /// The mapping is structurally insufficient to validate rows.
    #[error(transparent)]
    Validate(#[from] ValidateError),

    /// The requested operation is not valid in the current state.
    #[error("cannot {action} while in the {state} step")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    /// Commit was requested but no row survived validation.
    #[error("no valid rows to import")]
    NothingToCommit,

    /// The bulk-insert call failed; nothing is assumed written.
    #[error("bulk insert failed: {0}")]
    Commit(anyhow::Error),
}
