//! Run Pipeline use case
//!
//! Threads one [`PipelineState`] through a fixed sequence of stages:
//!
//! | Stage                | Component          | Writes          | Failure                  |
//! |----------------------|--------------------|-----------------|--------------------------|
//! | 1. Retrieve          | [`Retriever`]      | `chunks`        | `EmptyQuery`, `RetrievalUnavailable` |
//! | 2. Rerank            | [`Reranker`]       | `ranked_chunks` | `GenerationFailed`       |
//! | 3. Compose           | `PromptTemplate`   | `prompt`        | -                        |
//! | 4. Generate          | [`Generator`]      | `response`      | `GenerationFailed`       |
//! | 5. Guardrail check   | `GuardrailChecker` | `guardrails`    | -                        |
//! | 6. Validate          | [`Validator`]      | `validation`    | `ValidationUnavailable`  |
//! | 7. Append to history | `PipelineState`    | `history`       | -                        |
//!
//! There are no branches, retries, or partial results. Cancellation is
//! checked before each stage.

mod generate;
mod rerank;
mod retrieve;
mod types;
mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use generate::Generator;
pub use rerank::Reranker;
pub use retrieve::Retriever;
pub use types::PipelineError;
pub use validate::Validator;

use crate::config::PipelineParams;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoPipelineProgress, PipelineProgressNotifier};
use crate::ports::run_logger::{NoRunLogger, RunEvent, RunLogger};
use crate::ports::vector_search::VectorSearchPort;
use crate::use_cases::shared::check_cancelled;
use medguard_domain::util::one_line_preview;
use medguard_domain::{GuardrailChecker, PipelineStage, PipelineState, PromptTemplate, Query};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Text-generation collaborators, one per role.
#[derive(Clone)]
pub struct PipelineGateways {
    pub reranker: Arc<dyn LlmGateway>,
    pub generator: Arc<dyn LlmGateway>,
    pub validator: Arc<dyn LlmGateway>,
}

impl PipelineGateways {
    /// Use the same gateway for every role.
    pub fn shared(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            reranker: gateway.clone(),
            generator: gateway.clone(),
            validator: gateway,
        }
    }
}

/// Use case for answering one clinical question turn
pub struct RunPipelineUseCase {
    retriever: Retriever,
    reranker: Reranker,
    generator: Generator,
    validator: Validator,
    guardrails: GuardrailChecker,
    params: PipelineParams,
    run_logger: Arc<dyn RunLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl RunPipelineUseCase {
    pub fn new(
        search: Arc<dyn VectorSearchPort>,
        gateways: PipelineGateways,
        params: PipelineParams,
    ) -> Self {
        Self {
            retriever: Retriever::new(search).with_timeout(params.retrieval_timeout),
            reranker: Reranker::new(gateways.reranker).with_timeout(params.generation_timeout),
            generator: Generator::new(gateways.generator).with_timeout(params.generation_timeout),
            validator: Validator::new(gateways.validator).with_timeout(params.validation_timeout),
            guardrails: GuardrailChecker::new(params.speculation_markers),
            params,
            run_logger: Arc::new(NoRunLogger),
            cancellation_token: None,
        }
    }

    /// Create with a run logger.
    pub fn with_run_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.run_logger = logger;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Run one turn without progress reporting.
    pub async fn execute(
        &self,
        query: &str,
        previous: Option<&PipelineState>,
    ) -> Result<PipelineState, PipelineError> {
        self.execute_with_progress(query, previous, &NoPipelineProgress)
            .await
    }

    /// Run one turn.
    ///
    /// Only the `history` of `previous` is carried into the new state. On
    /// success the returned state is terminal and its history ends with this
    /// turn. On failure no state is returned.
    pub async fn execute_with_progress(
        &self,
        query: &str,
        previous: Option<&PipelineState>,
        progress: &dyn PipelineProgressNotifier,
    ) -> Result<PipelineState, PipelineError> {
        info!("Starting pipeline: {}", one_line_preview(query, 100));

        let result = self.run_stages(query, previous, progress).await;

        match &result {
            Ok(state) => {
                let safe = state.guardrails().is_some_and(|g| g.safe_to_use());
                let approved = state.validation().is_some_and(|v| v.approved);
                info!(
                    "Pipeline completed: {} ranked chunks, safe_to_use = {}, approved = {}",
                    state.ranked_chunks().len(),
                    safe,
                    approved
                );
                self.run_logger.log(RunEvent::completed(state));
            }
            Err(e) => {
                warn!("Pipeline failed: {}", e);
                self.run_logger.log(RunEvent::failed(query, &e.to_string()));
            }
        }

        result
    }

    async fn run_stages(
        &self,
        query: &str,
        previous: Option<&PipelineState>,
        progress: &dyn PipelineProgressNotifier,
    ) -> Result<PipelineState, PipelineError> {
        check_cancelled(&self.cancellation_token)?;
        let query = Query::try_new(query)?;
        let mut state = PipelineState::from_previous(query, previous);

        // 1. Retrieve
        let stage = self.begin(PipelineStage::Retrieved, progress)?;
        let chunks = self
            .retriever
            .retrieve(state.query(), self.params.retrieval_k)
            .await
            .inspect_err(|e| progress.on_stage_failed(stage, &e.to_string()))?;
        state.record_retrieval(chunks)?;
        self.finish(&state, progress);

        // 2. Rerank
        let stage = self.begin(PipelineStage::Ranked, progress)?;
        let ranked = self
            .reranker
            .rerank(state.query(), state.chunks(), self.params.rerank_top_k)
            .await
            .inspect_err(|e| progress.on_stage_failed(stage, &e.to_string()))?;
        state.record_ranking(ranked)?;
        self.finish(&state, progress);

        // 3. Compose
        self.begin(PipelineStage::PromptBuilt, progress)?;
        let prompt = PromptTemplate::answer_prompt(
            state.ranked_chunks(),
            state.query(),
            state.history().window(self.params.history_window),
        );
        state.record_prompt(prompt)?;
        self.finish(&state, progress);

        // 4. Generate
        let stage = self.begin(PipelineStage::Generated, progress)?;
        let response = self
            .generator
            .generate(state.prompt())
            .await
            .inspect_err(|e| progress.on_stage_failed(stage, &e.to_string()))?;
        state.record_response(response)?;
        self.finish(&state, progress);

        // 5. Guardrail check
        self.begin(PipelineStage::GuardrailChecked, progress)?;
        let guardrails = self.guardrails.check(state.response());
        state.record_guardrails(guardrails)?;
        self.finish(&state, progress);

        // 6. Validate
        let stage = self.begin(PipelineStage::Validated, progress)?;
        let validation = self
            .validator
            .validate(state.response(), state.query())
            .await
            .inspect_err(|e| progress.on_stage_failed(stage, &e.to_string()))?;
        state.record_validation(validation)?;
        self.finish(&state, progress);

        // 7. Append to history
        self.begin(PipelineStage::HistoryAppended, progress)?;
        state.append_to_history()?;
        self.finish(&state, progress);

        Ok(state)
    }

    fn begin(
        &self,
        stage: PipelineStage,
        progress: &dyn PipelineProgressNotifier,
    ) -> Result<PipelineStage, PipelineError> {
        check_cancelled(&self.cancellation_token)?;
        progress.on_stage_start(stage);
        Ok(stage)
    }

    fn finish(&self, state: &PipelineState, progress: &dyn PipelineProgressNotifier) {
        debug!("Pipeline stage reached: {}", state.stage());
        progress.on_stage_complete(state.stage());
    }
}
