//! Port for structured run logging.
//!
//! Defines the [`RunLogger`] trait for recording finished pipeline runs to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures each run's
//! full state in a machine-readable format (JSONL).

use medguard_domain::PipelineState;
use serde_json::{Value, json};

/// A structured run event for logging.
///
/// The adapter adds the timestamp when it writes the record.
pub struct RunEvent {
    /// Event type identifier (e.g., "pipeline_completed", "pipeline_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RunEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// Terminal state of a successful run, nested and flattened.
    pub fn completed(state: &PipelineState) -> Self {
        Self::new(
            "pipeline_completed",
            json!({
                "state": state.to_json(),
                "params": state.params(),
            }),
        )
    }

    /// A run that ended in an error. No partial state is recorded.
    pub fn failed(query: &str, error: &str) -> Self {
        Self::new(
            "pipeline_failed",
            json!({
                "query": query,
                "error": error,
            }),
        )
    }
}

/// Port for logging run events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and non-fallible: a logging failure must
/// never fail the pipeline, so implementations swallow their own errors.
pub trait RunLogger: Send + Sync {
    /// Record a run event.
    fn log(&self, event: RunEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoRunLogger;

impl RunLogger for NoRunLogger {
    fn log(&self, _event: RunEvent) {}
}
