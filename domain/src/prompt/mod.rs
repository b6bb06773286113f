//! Prompt domain
//!
//! Templates for the answer, rerank, and validation prompts.

mod template;

pub use template::PromptTemplate;
