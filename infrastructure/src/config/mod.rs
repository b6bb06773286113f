//! Configuration file loading for medguard
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MEDGUARD_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./medguard.toml` or `./.medguard.toml`
//! 4. Global config: `$XDG_CONFIG_HOME/medguard/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_MODEL, FileConfig, FileEmbeddingsConfig, FileIndexConfig,
    FileLoggingConfig, FileModelsConfig, FileOpenAiConfig, FileOutputConfig, FileOutputFormat,
    FilePipelineConfig, FileProvidersConfig, FileReplConfig, FileTimeoutsConfig,
};
pub use loader::ConfigLoader;
