//! Port definitions (interfaces for external adapters)
//!
//! Ports define the boundaries between the application and infrastructure
//! layers. The application depends only on these traits; adapters in the
//! infrastructure layer implement them.

pub mod llm_gateway;
pub mod progress;
pub mod run_logger;
pub mod vector_search;
