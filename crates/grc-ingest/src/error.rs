use thiserror::Error;

/// Structural (file-level) ingestion failures.
///
/// These abort the workflow step they occur in; they are never attached to
/// individual rows.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("empty source: {0}")]
    EmptySource(String),

    #[error("unsupported file extension: {0} (expected .csv, .xlsx or .xls)")]
    UnsupportedExtension(String),

    #[error("invalid workbook: {0}")]
    InvalidWorkbook(String),

    #[error("unrecognized google sheets url: {0}")]
    InvalidSheetUrl(String),

    #[error("failed to fetch sheet: {0}")]
    FetchFailed(String),

    #[error("sheet is not shared for link access (response was not CSV)")]
    AccessDenied,

    #[error("csv serialization error: {0}")]
    Csv(#[from] csv::Error),
}
