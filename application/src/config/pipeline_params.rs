//! Pipeline parameters: stage sizes, history window, and timeouts.
//!
//! [`PipelineParams`] groups the static parameters that control
//! [`RunPipelineUseCase`](crate::use_cases::run_pipeline::RunPipelineUseCase).
//! They are fixed for the lifetime of the use case.

use medguard_domain::SpeculationMarkers;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pipeline control parameters.
///
/// A `None` timeout lets the corresponding external call block for as
/// long as the collaborator takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Number of candidates requested from vector search.
    pub retrieval_k: usize,
    /// Maximum number of chunks kept by the reranker.
    pub rerank_top_k: usize,
    /// Most recent turns exposed to the prompt (`None` = all).
    pub history_window: Option<usize>,
    /// Speculation marker list used by the guardrail checker.
    pub speculation_markers: SpeculationMarkers,
    /// Timeout for the vector-search call.
    pub retrieval_timeout: Option<Duration>,
    /// Timeout for each reranking and generation call.
    pub generation_timeout: Option<Duration>,
    /// Timeout for the validation call.
    pub validation_timeout: Option<Duration>,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            retrieval_k: 5,
            rerank_top_k: 5,
            history_window: Some(5),
            speculation_markers: SpeculationMarkers::Word,
            retrieval_timeout: Some(Duration::from_secs(30)),
            generation_timeout: Some(Duration::from_secs(120)),
            validation_timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl PipelineParams {
    // ==================== Builder Methods ====================

    pub fn with_retrieval_k(mut self, k: usize) -> Self {
        self.retrieval_k = k;
        self
    }

    pub fn with_rerank_top_k(mut self, top_k: usize) -> Self {
        self.rerank_top_k = top_k;
        self
    }

    pub fn with_history_window(mut self, window: Option<usize>) -> Self {
        self.history_window = window;
        self
    }

    pub fn with_speculation_markers(mut self, markers: SpeculationMarkers) -> Self {
        self.speculation_markers = markers;
        self
    }

    pub fn with_retrieval_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.retrieval_timeout = timeout;
        self
    }

    pub fn with_generation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub fn with_validation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.validation_timeout = timeout;
        self
    }

    /// Drop all timeouts.
    pub fn without_timeouts(self) -> Self {
        self.with_retrieval_timeout(None)
            .with_generation_timeout(None)
            .with_validation_timeout(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PipelineParams::default();
        assert_eq!(params.retrieval_k, 5);
        assert_eq!(params.rerank_top_k, 5);
        assert_eq!(params.history_window, Some(5));
        assert_eq!(params.speculation_markers, SpeculationMarkers::Word);
        assert_eq!(params.generation_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_builder_chain() {
        let params = PipelineParams::default()
            .with_retrieval_k(10)
            .with_rerank_top_k(3)
            .with_history_window(None)
            .with_speculation_markers(SpeculationMarkers::Phrase)
            .without_timeouts();

        assert_eq!(params.retrieval_k, 10);
        assert_eq!(params.rerank_top_k, 3);
        assert_eq!(params.history_window, None);
        assert_eq!(params.speculation_markers, SpeculationMarkers::Phrase);
        assert!(params.retrieval_timeout.is_none());
        assert!(params.validation_timeout.is_none());
    }
}
