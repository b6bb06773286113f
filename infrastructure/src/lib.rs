//! Infrastructure layer for medguard
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod retrieval;

#[cfg(test)]
mod test_http;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEmbeddingsConfig, FileModelsConfig,
    FileOpenAiConfig, FileOutputConfig, FileOutputFormat, FileReplConfig,
};
pub use logging::JsonlRunLogger;
pub use providers::OpenAiChatGateway;
pub use retrieval::{EmbeddingProvider, FlatIndex, IndexedRecordSearch, OpenAiEmbeddingProvider};
