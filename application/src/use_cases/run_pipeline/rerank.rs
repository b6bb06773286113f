//! Reranking stage: collaborator-cited reordering of retrieved chunks.

use super::generate::invoke_text;
use super::types::PipelineError;
use crate::ports::llm_gateway::LlmGateway;
use medguard_domain::{Chunk, PipelineStage, PromptTemplate, parse_citations, select_cited};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Reorders candidates by asking a text-generation collaborator which
/// positions are most relevant.
///
/// When the reply cites no valid position, the first `top_k` candidates are
/// kept in retrieval order instead of failing.
pub struct Reranker {
    gateway: Arc<dyn LlmGateway>,
    timeout: Option<Duration>,
}

impl Reranker {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn rerank(
        &self,
        query: &str,
        chunks: &[Chunk],
        top_k: usize,
    ) -> Result<Vec<Chunk>, PipelineError> {
        if chunks.is_empty() || top_k == 0 {
            debug!("Nothing to rerank ({} chunks, top_k = {})", chunks.len(), top_k);
            return Ok(Vec::new());
        }

        let prompt = PromptTemplate::rerank_prompt(query, chunks);
        let reply = invoke_text(self.gateway.as_ref(), &prompt, self.timeout)
            .await
            .map_err(|message| PipelineError::generation(PipelineStage::Ranked, message))?;

        let scan = parse_citations(&reply, chunks.len());
        if scan.malformed > 0 || scan.out_of_range > 0 {
            debug!(
                "Skipped citations: {} malformed, {} out of range",
                scan.malformed, scan.out_of_range
            );
        }
        if scan.is_empty() {
            debug!("No valid citations; keeping first {} in retrieval order", top_k);
        }

        Ok(select_cited(chunks, &scan.positions, top_k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::run_pipeline::test_support::{Scripted, ScriptedGateway};
    use medguard_domain::is_rank_monotonic;

    fn chunks(n: usize) -> Vec<Chunk> {
        (1..=n)
            .map(|i| Chunk::new(i, format!("p-{i}"), format!("summary {i}"), i as f32 / 10.0))
            .collect()
    }

    async fn rerank_with(reply: &str, input: &[Chunk], top_k: usize) -> Vec<Chunk> {
        let gateway = Arc::new(ScriptedGateway::replying(reply));
        Reranker::new(gateway)
            .rerank("What medications is the patient on?", input, top_k)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_reply_without_brackets_keeps_retrieval_order() {
        let input = chunks(5);
        let ranked = rerank_with("Summaries two and four look most relevant.", &input, 5).await;
        assert_eq!(ranked, input);
    }

    #[tokio::test]
    async fn test_fallback_for_any_unparsable_reply() {
        let input = chunks(7);
        for reply in ["", "[x]\n[]\n[two]", "[0]\n[8]\n[-1]", "] [3"] {
            let ranked = rerank_with(reply, &input, 5).await;
            assert_eq!(ranked, input[..5].to_vec(), "reply: {reply:?}");
        }
    }

    #[tokio::test]
    async fn test_citation_order_is_followed() {
        let input = chunks(5);
        let ranked = rerank_with("[4] summary 4\n[2] summary 2\n[4] again", &input, 5).await;

        let ids: Vec<_> = ranked.iter().map(|c| c.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["p-4", "p-2"]);
        assert!(is_rank_monotonic(&ranked));
    }

    #[tokio::test]
    async fn test_output_never_exceeds_top_k() {
        let input = chunks(5);
        let ranked = rerank_with("[5]\n[4]\n[3]\n[2]\n[1]", &input, 2).await;
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].patient_id, "p-5");
    }

    #[tokio::test]
    async fn test_prompt_enumerates_candidates() {
        let gateway = Arc::new(ScriptedGateway::replying("[1]"));
        Reranker::new(gateway.clone())
            .rerank("Any allergies?", &chunks(2), 5)
            .await
            .unwrap();
        let prompt = gateway.prompt(0);
        assert!(prompt.contains("[1] summary 1"));
        assert!(prompt.contains("[2] summary 2"));
    }

    #[tokio::test]
    async fn test_empty_candidates_skip_the_collaborator() {
        let gateway = Arc::new(ScriptedGateway::replying("[1]"));
        let ranked = Reranker::new(gateway.clone())
            .rerank("Any allergies?", &[], 5)
            .await
            .unwrap();
        assert!(ranked.is_empty());
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_collaborator_failure_is_generation_failed() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Scripted::Fail("boom".into())]));
        let err = Reranker::new(gateway)
            .rerank("Any allergies?", &chunks(3), 5)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::GenerationFailed {
                stage: PipelineStage::Ranked,
                ..
            }
        ));
    }
}
