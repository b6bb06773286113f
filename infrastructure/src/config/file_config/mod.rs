//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod models;
mod output;
mod pipeline;
mod providers;
mod repl;
mod storage;
mod timeouts;

pub use models::{DEFAULT_MODEL, FileModelsConfig};
pub use output::{FileOutputConfig, FileOutputFormat};
pub use pipeline::FilePipelineConfig;
pub use providers::{FileEmbeddingsConfig, FileOpenAiConfig, FileProvidersConfig};
pub use repl::FileReplConfig;
pub use storage::{FileIndexConfig, FileLoggingConfig};
pub use timeouts::FileTimeoutsConfig;

use medguard_application::PipelineParams;
use medguard_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that cannot be used to run the pipeline.
#[derive(Error, Debug)]
#[error("Invalid configuration: {}", .issues.iter().map(|i| i.message.as_str()).collect::<Vec<_>>().join("; "))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Stage sizes, history window, guardrail profile
    pub pipeline: FilePipelineConfig,
    /// External call timeouts
    pub timeouts: FileTimeoutsConfig,
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Chat-completions provider settings
    pub providers: FileProvidersConfig,
    /// Query embedding endpoint
    pub embeddings: FileEmbeddingsConfig,
    /// Patient-record index
    pub index: FileIndexConfig,
    /// Run log and diagnostic log destinations
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.pipeline.validate());
        issues.extend(self.models.validate());

        if self
            .index
            .path
            .as_deref()
            .is_none_or(|path| path.trim().is_empty())
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingIndexPath,
                "index.path is not set; point it at a JSON record index",
            ));
        }

        issues
    }

    /// Split issues into fatal errors and warnings.
    ///
    /// Returns the warnings when nothing is fatal.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError { issues: errors })
        }
    }

    /// Application-level pipeline parameters.
    pub fn pipeline_params(&self) -> PipelineParams {
        PipelineParams::default()
            .with_retrieval_k(self.pipeline.retrieval_k)
            .with_rerank_top_k(self.pipeline.rerank_top_k)
            .with_history_window(self.pipeline.history_window())
            .with_speculation_markers(self.pipeline.parse_speculation_markers().0)
            .with_retrieval_timeout(self.timeouts.retrieval())
            .with_generation_timeout(self.timeouts.generation())
            .with_validation_timeout(self.timeouts.validation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medguard_domain::{OutputFormat, SpeculationMarkers};
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[pipeline]
retrieval_k = 8
rerank_top_k = 3
history_window = 2
speculation_markers = "phrase"

[timeouts]
generation_secs = 0

[models]
generator = "llama-3.1-8b-instant"

[providers.openai]
base_url = "http://localhost:11434"
api_key_env = "OLLAMA_KEY"
temperature = 0.2

[embeddings]
model = "bge-small-en"

[index]
path = "data/records.json"

[logging]
run_log = "logs/runs.jsonl"

[output]
format = "json"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/medguard/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pipeline.retrieval_k, 8);
        assert_eq!(config.models.generator, "llama-3.1-8b-instant");
        assert_eq!(config.models.validator, DEFAULT_MODEL);
        assert_eq!(config.providers.openai.base_url, "http://localhost:11434");
        assert_eq!(config.providers.openai.temperature, Some(0.2));
        assert_eq!(config.embeddings.model, "bge-small-en");
        assert_eq!(config.index.path.as_deref(), Some("data/records.json"));
        assert_eq!(config.logging.run_log.as_deref(), Some("logs/runs.jsonl"));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);

        let params = config.pipeline_params();
        assert_eq!(params.retrieval_k, 8);
        assert_eq!(params.rerank_top_k, 3);
        assert_eq!(params.history_window, Some(2));
        assert_eq!(params.speculation_markers, SpeculationMarkers::Phrase);
        assert_eq!(params.generation_timeout, None);
        assert_eq!(params.retrieval_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.pipeline.rerank_top_k, 5);
        assert_eq!(config.models.generator, DEFAULT_MODEL);
        assert_eq!(config.providers.openai.api_key_env, "GROQ_API_KEY");
        assert!(config.index.path.is_none());
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert_eq!(config.pipeline_params(), PipelineParams::default());
    }

    #[test]
    fn test_missing_index_is_fatal() {
        let config = FileConfig::default();
        let err = config.check().unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].code, ConfigIssueCode::MissingIndexPath);
        assert!(err.to_string().contains("index.path"));
    }

    #[test]
    fn test_warnings_do_not_block() {
        let mut config = FileConfig::default();
        config.index.path = Some("records.json".to_string());
        config.pipeline.speculation_markers = "nope".to_string();

        let warnings = config.check().unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.pipeline_params().speculation_markers, SpeculationMarkers::Word);
    }
}
