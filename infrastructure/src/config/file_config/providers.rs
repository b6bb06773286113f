//! Provider configuration from TOML (`[providers]` and `[embeddings]` sections)

use serde::{Deserialize, Serialize};

/// Resolve an API key: the inline key wins, then the named environment variable.
fn resolve_key(api_key: &Option<String>, api_key_env: &str) -> Option<String> {
    api_key
        .clone()
        .filter(|key| !key.is_empty())
        .or_else(|| std::env::var(api_key_env).ok().filter(|key| !key.is_empty()))
}

/// OpenAI-compatible chat-completions provider configuration.
///
/// Defaults target Groq's OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Base URL; `/v1/chat/completions` is appended.
    pub base_url: String,
    /// Environment variable name for the API key (default: "GROQ_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Max tokens per response (provider default when unset).
    pub max_tokens: Option<u32>,
    /// Sampling temperature (provider default when unset).
    pub temperature: Option<f32>,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            api_key: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl FileOpenAiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(&self.api_key, &self.api_key_env)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// OpenAI-compatible chat API settings.
    pub openai: FileOpenAiConfig,
}

/// OpenAI-compatible embeddings endpoint used to encode queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEmbeddingsConfig {
    /// Base URL; `/v1/embeddings` is appended.
    pub base_url: String,
    /// Environment variable name for the API key.
    pub api_key_env: String,
    /// Direct API key. Local servers usually need none.
    pub api_key: Option<String>,
    /// Embedding model; must match the one the index was built with.
    pub model: String,
}

impl Default for FileEmbeddingsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key_env: "EMBEDDINGS_API_KEY".to_string(),
            api_key: None,
            model: "all-MiniLM-L6-v2".to_string(),
        }
    }
}

impl FileEmbeddingsConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(&self.api_key, &self.api_key_env)
    }
}
