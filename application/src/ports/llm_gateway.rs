//! LLM Gateway port
//!
//! Defines the interface for communicating with text-generation collaborators.

use async_trait::async_trait;
use medguard_domain::{Completion, Message};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for text generation
///
/// One gateway is bound to one model. The pipeline holds a separate gateway
/// per role (reranker, generator, validator), so roles can use different
/// models or providers. Implementations (adapters) live in the
/// infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Model identifier this gateway talks to
    fn model(&self) -> &str;

    /// Send a message sequence and return the raw completion
    async fn invoke(&self, messages: &[Message]) -> Result<Completion, GatewayError>;

    /// Send a single user prompt
    async fn invoke_prompt(&self, prompt: &str) -> Result<Completion, GatewayError> {
        self.invoke(&[Message::user(prompt)]).await
    }
}
