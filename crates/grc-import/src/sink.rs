//! The external persistence collaborator.

use grc_model::Control;

/// Bulk-insert collaborator for the commit step.
///
/// The whole valid-row batch goes out in a single call; the contract is
/// batch-level only, with no per-row results surfaced back. A failure means
/// nothing may be assumed written.
pub trait BulkInserter {
    fn insert_batch(&self, collection: &str, records: &[Control]) -> anyhow::Result<()>;
}
