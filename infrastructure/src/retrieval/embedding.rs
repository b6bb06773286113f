//! Query encoders for the record index.
//!
//! [`OpenAiEmbeddingProvider`] calls any server exposing the OpenAI
//! `/v1/embeddings` API, e.g. a local text-embeddings server hosting the
//! same sentence-transformer the index was built with.

use crate::config::FileEmbeddingsConfig;
use async_trait::async_trait;
use medguard_application::ports::vector_search::SearchError;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Encodes text into the vector space of the record index.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SearchError>;
}

/// An [`EmbeddingProvider`] backed by an OpenAI-compatible embeddings API.
pub struct OpenAiEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiEmbeddingProvider {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
        }
    }

    /// Build a provider from the `[embeddings]` section. The key is optional.
    pub fn from_config(config: &FileEmbeddingsConfig) -> Self {
        let mut provider = Self::new(&config.base_url, &config.model);
        provider.api_key = config.resolve_api_key();
        provider
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/embeddings", self.base_url.trim_end_matches('/'))
    }
}

// ── API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
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
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SearchError> {
        debug!(model = %self.model, text_len = text.len(), "embedding query");

        let request_body = EmbeddingRequest {
            model: &self.model,
            input: vec![text],
        };

        let mut request = self.client.post(self.endpoint()).json(&request_body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "embedding request failed");
            SearchError::EmbeddingFailed(format!("request failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(%status, "embedding API error");
            return Err(SearchError::EmbeddingFailed(format!(
                "API returned {status}: {detail}"
            )));
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse embedding response");
            SearchError::EmbeddingFailed(format!("failed to parse response: {e}"))
        })?;

        embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| SearchError::EmbeddingFailed("API returned empty response".into()))
    }
}
