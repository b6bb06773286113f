//! Application layer for medguard
//!
//! This crate contains the pipeline use case, its port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PipelineParams;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoPipelineProgress, PipelineProgressNotifier},
    run_logger::{NoRunLogger, RunEvent, RunLogger},
    vector_search::{PatientRecord, SearchError, SearchHit, VectorSearchPort},
};
pub use use_cases::run_pipeline::{
    Generator, PipelineError, PipelineGateways, Reranker, Retriever, RunPipelineUseCase, Validator,
};
