//! Model configuration from TOML (`[models]` section)

use medguard_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Default chat model for every role
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Role-based model selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model that writes the answer
    pub generator: String,
    /// Model that cites relevant records
    pub reranker: String,
    /// Model that reviews the answer
    pub validator: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            generator: DEFAULT_MODEL.to_string(),
            reranker: DEFAULT_MODEL.to_string(),
            validator: DEFAULT_MODEL.to_string(),
        }
    }
}

impl FileModelsConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("models.generator", &self.generator),
            ("models.reranker", &self.reranker),
            ("models.validator", &self.validator),
        ]
        .into_iter()
        .filter(|(_, name)| name.trim().is_empty())
        .map(|(field, _)| {
            ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: field.to_string(),
                },
                format!("{field}: model name is empty"),
            )
        })
        .collect()
    }
}
