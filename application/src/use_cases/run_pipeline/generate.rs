//! Generation stage: prompt → answer text.

use super::types::PipelineError;
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::shared::{timed_out, with_timeout};
use medguard_domain::PipelineStage;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Send `prompt` to `gateway` and flatten the completion to plain text.
///
/// Errors are returned as messages so each stage can wrap them in its own
/// failure variant.
pub(super) async fn invoke_text(
    gateway: &dyn LlmGateway,
    prompt: &str,
    timeout: Option<Duration>,
) -> Result<String, String> {
    let completion = with_timeout(timeout, gateway.invoke_prompt(prompt))
        .await
        .map_err(timed_out)?
        .map_err(|e| e.to_string())?;

    completion.into_text().map_err(|e| e.to_string())
}

/// Produces the answer text from the composed prompt. No retries.
pub struct Generator {
    gateway: Arc<dyn LlmGateway>,
    timeout: Option<Duration>,
}

impl Generator {
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

    pub async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        debug!("Generating with model {}", self.gateway.model());
        invoke_text(self.gateway.as_ref(), prompt, self.timeout)
            .await
            .map_err(|message| PipelineError::generation(PipelineStage::Generated, message))
    }
}
