//! Guardrail domain
//!
//! Fast, deterministic lexical screening of generated answers.

pub mod checker;

pub use checker::{GuardrailChecker, GuardrailResult, HALLUCINATION_MARKERS, SpeculationMarkers};
