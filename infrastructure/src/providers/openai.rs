//! OpenAI-compatible chat-completions gateway
//!
//! Implements [`LlmGateway`] over `POST {base_url}/v1/chat/completions`.
//! Works with Groq, OpenAI, vLLM, Ollama, and any server that follows the
//! chat completions API format.

use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use medguard_application::ports::llm_gateway::{GatewayError, LlmGateway};
use medguard_domain::{Completion, Message, Role};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Chat-completions gateway bound to one model.
pub struct OpenAiChatGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl OpenAiChatGateway {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Build a gateway for `model` from the `[providers.openai]` section.
    ///
    /// Remote endpoints require an API key; local ones (localhost) do not.
    pub fn from_config(config: &FileOpenAiConfig, model: &str) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key();
        if api_key.is_none() && !is_local(&config.base_url) {
            return Err(GatewayError::MissingApiKey(config.api_key_env.clone()));
        }

        let mut gateway = Self::new(&config.base_url, model);
        gateway.api_key = api_key;
        gateway.max_tokens = config.max_tokens;
        gateway.temperature = config.temperature;
        Ok(gateway)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn is_local(base_url: &str) -> bool {
    base_url.contains("localhost") || base_url.contains("127.0.0.1")
}

// ==================== Wire types ====================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[async_trait]
impl LlmGateway for OpenAiChatGateway {
    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, messages: &[Message]) -> Result<Completion, GatewayError> {
        let request = ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(model = %self.model, messages = messages.len(), "chat completion request");

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else if e.is_connect() {
                GatewayError::ConnectionError(e.to_string())
            } else {
                GatewayError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!(model = %self.model, %status, "chat completion failed");

            return Err(if status == StatusCode::NOT_FOUND {
                GatewayError::ModelNotAvailable(format!("{}: {}", self.model, detail))
            } else {
                GatewayError::RequestFailed(format!("API returned {status}: {detail}"))
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;

        Ok(Completion::Message {
            role: Role::Assistant,
            content: choice.message.content.unwrap_or_default(),
        })
    }
}
