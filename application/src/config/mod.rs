//! Application-level configuration.
//!
//! - [`PipelineParams`]: stage sizes, history window, guardrail profile and timeouts

pub mod pipeline_params;

pub use pipeline_params::PipelineParams;
