//! Progress notification port
//!
//! Defines the interface for reporting progress while a pipeline runs.

use medguard_domain::PipelineStage;

/// Callback for progress updates during a pipeline run
///
/// `stage` is the stage being produced (e.g. [`PipelineStage::Retrieved`]
/// while retrieval is running). Implementations live in the presentation
/// layer.
pub trait PipelineProgressNotifier: Send + Sync {
    /// Called when work towards a stage starts
    fn on_stage_start(&self, stage: PipelineStage);

    /// Called when a stage has been recorded on the state
    fn on_stage_complete(&self, stage: PipelineStage);

    /// Called when the work towards a stage fails
    fn on_stage_failed(&self, _stage: PipelineStage, _error: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoPipelineProgress;

impl PipelineProgressNotifier for NoPipelineProgress {
    fn on_stage_start(&self, _stage: PipelineStage) {}
    fn on_stage_complete(&self, _stage: PipelineStage) {}
}
