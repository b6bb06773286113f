//! Domain layer for medguard
//!
//! This crate contains the core types and pure logic of the clinical
//! question-answering pipeline. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Pipeline
//!
//! One user turn runs a fixed linear sequence of stages over a single
//! [`PipelineState`]:
//!
//! retrieve → rerank → compose → generate → guardrail-check → validate →
//! append-to-history
//!
//! ## Safety checks
//!
//! - **Guardrails**: deterministic lexical scan of the answer text
//! - **Validation**: collaborator-judged review of the (query, answer) pair
//!
//! The two verdicts are independent and are always reported side by side.

pub mod config;
pub mod conversation;
pub mod core;
pub mod guardrail;
pub mod pipeline;
pub mod prompt;
pub mod record;
pub mod review;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use conversation::{ConversationHistory, ConversationTurn};
pub use core::{error::DomainError, query::Query};
pub use guardrail::{GuardrailChecker, GuardrailResult, HALLUCINATION_MARKERS, SpeculationMarkers};
pub use pipeline::{PipelineStage, PipelineState, flatten_params};
pub use prompt::PromptTemplate;
pub use record::{Chunk, is_rank_monotonic};
pub use review::{CitationScan, ValidationResult, parse_citations, parse_validation_reply, select_cited};
pub use session::{Completion, Message, Role};
