//! Progress reporting for pipeline execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use medguard_application::ports::progress::PipelineProgressNotifier;
use medguard_domain::PipelineStage;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per stage
///
/// Draws to stderr so that stdout stays clean for `--format json`.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// "[2/7]"-style position of a stage among the seven working stages
    fn step_label(stage: PipelineStage) -> String {
        let total = PipelineStage::ALL.len() - 1;
        let step = PipelineStage::ALL
            .iter()
            .position(|s| *s == stage)
            .unwrap_or(0);
        format!("[{}/{}]", step, total)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: PipelineStage) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::step_label(stage));
        pb.set_message(format!("{}...", stage.activity()));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_stage_complete(&self, stage: PipelineStage) {
        if let Some(pb) = self.spinner.lock().ok().and_then(|mut s| s.take()) {
            pb.finish_with_message(format!("{} {}", stage.activity(), "done".green()));
        }
    }

    fn on_stage_failed(&self, stage: PipelineStage, error: &str) {
        if let Some(pb) = self.spinner.lock().ok().and_then(|mut s| s.take()) {
            pb.abandon_with_message(format!("{} {}: {}", stage.activity(), "failed".red(), error));
        }
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Used when stderr is not a terminal, e.g. when piped into a log file.
pub struct SimpleProgress;

impl SimpleProgress {
    fn start_line(stage: PipelineStage) -> String {
        format!("{} {}", "->".cyan(), stage.activity().bold())
    }

    fn complete_line(stage: PipelineStage) -> String {
        format!("  {} {}", "v".green(), stage)
    }

    fn failed_line(stage: PipelineStage, error: &str) -> String {
        format!("  {} {} ({})", "x".red(), stage, error)
    }
}

impl PipelineProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: PipelineStage) {
        eprintln!("{}", Self::start_line(stage));
    }

    fn on_stage_complete(&self, stage: PipelineStage) {
        eprintln!("{}", Self::complete_line(stage));
    }

    fn on_stage_failed(&self, stage: PipelineStage, error: &str) {
        eprintln!("{}", Self::failed_line(stage, error));
    }
}

/// Spinner on an interactive stderr, plain lines otherwise.
pub fn stage_reporter() -> Box<dyn PipelineProgressNotifier> {
    if ProgressDrawTarget::stderr().is_hidden() {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    }
}
