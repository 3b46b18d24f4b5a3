#![deny(unsafe_code)]

mod error;
mod sink;
mod workflow;

pub use error::WorkflowError;
pub use sink::BulkInserter;
pub use workflow::{
    CommitOutcome, ImportWorkflow, MappingStage, PreviewStage, PreviewSummary, WorkflowState,
};
