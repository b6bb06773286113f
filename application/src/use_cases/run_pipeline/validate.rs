//! Validation stage: collaborator review of the (query, answer) pair.

use super::generate::invoke_text;
use super::types::PipelineError;
use crate::ports::llm_gateway::LlmGateway;
use medguard_domain::{PromptTemplate, ValidationResult, parse_validation_reply};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Asks a reviewer collaborator whether an answer is plausible and grounded.
pub struct Validator {
    gateway: Arc<dyn LlmGateway>,
    timeout: Option<Duration>,
}

impl Validator {
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

    pub async fn validate(
        &self,
        response: &str,
        query: &str,
    ) -> Result<ValidationResult, PipelineError> {
        let prompt = PromptTemplate::validation_prompt(query, response);
        let reply = invoke_text(self.gateway.as_ref(), &prompt, self.timeout)
            .await
            .map_err(PipelineError::ValidationUnavailable)?;

        let result = parse_validation_reply(&reply).ok_or_else(|| {
            PipelineError::ValidationUnavailable("reviewer returned an empty reply".to_string())
        })?;

        debug!("Validation verdict: approved = {}", result.approved);
        Ok(result)
    }
}
