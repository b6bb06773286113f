//! Type definitions for the RunPipeline use case.

use medguard_domain::{DomainError, PipelineStage};
use thiserror::Error;

/// Errors that end a pipeline run.
///
/// Every variant is fatal for the turn; no partial state is returned.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("Retrieval unavailable: {0}")]
    RetrievalUnavailable(String),

    #[error("Generation failed while {}: {message}", stage.activity().to_lowercase())]
    GenerationFailed {
        stage: PipelineStage,
        message: String,
    },

    #[error("Validation unavailable: {0}")]
    ValidationUnavailable(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(DomainError),
}

impl PipelineError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PipelineError::Cancelled)
    }

    /// Check if a text-generation collaborator failed (reranking,
    /// generation, or validation).
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            PipelineError::GenerationFailed { .. } | PipelineError::ValidationUnavailable(_)
        )
    }

    pub(crate) fn generation(stage: PipelineStage, message: impl Into<String>) -> Self {
        PipelineError::GenerationFailed {
            stage,
            message: message.into(),
        }
    }
}

impl From<DomainError> for PipelineError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::EmptyQuery => PipelineError::EmptyQuery,
            other => PipelineError::Internal(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled() {
        let error = PipelineError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
        assert!(error.is_cancelled());
    }

    #[test]
    fn test_generation_failed_display() {
        let error = PipelineError::generation(PipelineStage::Ranked, "connection reset");
        assert_eq!(
            error.to_string(),
            "Generation failed while reranking records: connection reset"
        );
        assert!(error.is_generation_failure());
        assert!(!error.is_cancelled());
    }

    #[test]
    fn test_validation_unavailable_is_generation_failure() {
        assert!(PipelineError::ValidationUnavailable("timeout".into()).is_generation_failure());
        assert!(!PipelineError::RetrievalUnavailable("down".into()).is_generation_failure());
    }

    #[test]
    fn test_empty_query_maps_from_domain() {
        let error: PipelineError = DomainError::EmptyQuery.into();
        assert!(matches!(error, PipelineError::EmptyQuery));

        let error: PipelineError = DomainError::NoCandidates.into();
        assert!(matches!(error, PipelineError::Internal(DomainError::NoCandidates)));
    }
}
