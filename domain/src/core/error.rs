//! Domain error types

use crate::pipeline::stage::PipelineStage;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("Stage {attempted} cannot run while the pipeline is at {current}")]
    StageOutOfOrder {
        current: PipelineStage,
        attempted: PipelineStage,
    },

    #[error("Collaborator returned no generation candidates")]
    NoCandidates,
}

impl DomainError {
    /// Check if this error is an input validation failure
    pub fn is_empty_query(&self) -> bool {
        matches!(self, DomainError::EmptyQuery)
    }
}
