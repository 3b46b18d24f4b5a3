use thiserror::Error;

/// Structural (mapping-level) validation failures.
///
/// Row-level content problems are never represented here; those accumulate
/// as data on each `ImportRow`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidateError {
    #[error("mapping has no usable target fields")]
    NoMappedFields,

    #[error("neither required field (Código, Nome) is mapped")]
    MissingRequiredMapping,
}
