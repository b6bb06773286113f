//! The state threaded through one pipeline invocation.

use super::params::flatten_params;
use super::stage::PipelineStage;
use crate::conversation::ConversationHistory;
use crate::core::error::DomainError;
use crate::core::query::Query;
use crate::guardrail::GuardrailResult;
use crate::record::Chunk;
use crate::review::ValidationResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// State of one user turn (Aggregate)
///
/// Fields are written exactly once, in pipeline order, through the
/// `record_*` methods. Each method advances [`stage`](Self::stage) by one
/// step and refuses to run out of order, so an earlier field can never be
/// overwritten by a later stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineState {
    query: String,
    history: ConversationHistory,
    chunks: Vec<Chunk>,
    ranked_chunks: Vec<Chunk>,
    prompt: String,
    response: String,
    guardrails: Option<GuardrailResult>,
    validation: Option<ValidationResult>,
    stage: PipelineStage,
}

impl PipelineState {
    /// Fresh state for `query`, carrying `history` in from earlier turns.
    pub fn new(query: Query, history: ConversationHistory) -> Self {
        Self {
            query: query.into_content(),
            history,
            chunks: Vec::new(),
            ranked_chunks: Vec::new(),
            prompt: String::new(),
            response: String::new(),
            guardrails: None,
            validation: None,
            stage: PipelineStage::Start,
        }
    }

    /// Fresh state seeded only with the history of `previous`, if any.
    pub fn from_previous(query: Query, previous: Option<&PipelineState>) -> Self {
        let history = previous
            .map(|state| state.history.clone())
            .unwrap_or_default();
        Self::new(query, history)
    }

    fn advance(&mut self, to: PipelineStage) -> Result<(), DomainError> {
        if self.stage.next() != Some(to) {
            return Err(DomainError::StageOutOfOrder {
                current: self.stage,
                attempted: to,
            });
        }
        self.stage = to;
        Ok(())
    }

    pub fn record_retrieval(&mut self, chunks: Vec<Chunk>) -> Result<(), DomainError> {
        self.advance(PipelineStage::Retrieved)?;
        self.chunks = chunks;
        Ok(())
    }

    pub fn record_ranking(&mut self, ranked_chunks: Vec<Chunk>) -> Result<(), DomainError> {
        self.advance(PipelineStage::Ranked)?;
        self.ranked_chunks = ranked_chunks;
        Ok(())
    }

    pub fn record_prompt(&mut self, prompt: String) -> Result<(), DomainError> {
        self.advance(PipelineStage::PromptBuilt)?;
        self.prompt = prompt;
        Ok(())
    }

    pub fn record_response(&mut self, response: String) -> Result<(), DomainError> {
        self.advance(PipelineStage::Generated)?;
        self.response = response;
        Ok(())
    }

    pub fn record_guardrails(&mut self, guardrails: GuardrailResult) -> Result<(), DomainError> {
        self.advance(PipelineStage::GuardrailChecked)?;
        self.guardrails = Some(guardrails);
        Ok(())
    }

    pub fn record_validation(&mut self, validation: ValidationResult) -> Result<(), DomainError> {
        self.advance(PipelineStage::Validated)?;
        self.validation = Some(validation);
        Ok(())
    }

    /// Replace `history` with one that ends in this turn's query and response.
    pub fn append_to_history(&mut self) -> Result<(), DomainError> {
        self.advance(PipelineStage::HistoryAppended)?;
        self.history = self.history.append_turn(&self.query, &self.response);
        Ok(())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn ranked_chunks(&self) -> &[Chunk] {
        &self.ranked_chunks
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn guardrails(&self) -> Option<&GuardrailResult> {
        self.guardrails.as_ref()
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn is_complete(&self) -> bool {
        self.stage.is_terminal()
    }

    /// Full state as nested JSON.
    pub fn to_json(&self) -> serde_json::Value {
        // Serializing plain data into a Value cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Flat string parameters for external parameter stores.
    pub fn params(&self) -> BTreeMap<String, String> {
        flatten_params(&self.to_json())
    }
}
