//! Pipeline stages
//!
//! The pipeline is a fixed linear sequence with no branches or cycles:
//!
//! ```text
//! Start -> Retrieved -> Ranked -> PromptBuilt -> Generated
//!       -> GuardrailChecked -> Validated -> HistoryAppended
//! ```

use serde::{Deserialize, Serialize};

/// Position of a [`PipelineState`](super::PipelineState) in the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    #[default]
    Start,
    Retrieved,
    Ranked,
    PromptBuilt,
    Generated,
    GuardrailChecked,
    Validated,
    HistoryAppended,
}

impl PipelineStage {
    /// All stages in execution order.
    pub const ALL: [PipelineStage; 8] = [
        PipelineStage::Start,
        PipelineStage::Retrieved,
        PipelineStage::Ranked,
        PipelineStage::PromptBuilt,
        PipelineStage::Generated,
        PipelineStage::GuardrailChecked,
        PipelineStage::Validated,
        PipelineStage::HistoryAppended,
    ];

    /// The stage that follows this one, or `None` at the terminal stage.
    pub fn next(&self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Start => Some(PipelineStage::Retrieved),
            PipelineStage::Retrieved => Some(PipelineStage::Ranked),
            PipelineStage::Ranked => Some(PipelineStage::PromptBuilt),
            PipelineStage::PromptBuilt => Some(PipelineStage::Generated),
            PipelineStage::Generated => Some(PipelineStage::GuardrailChecked),
            PipelineStage::GuardrailChecked => Some(PipelineStage::Validated),
            PipelineStage::Validated => Some(PipelineStage::HistoryAppended),
            PipelineStage::HistoryAppended => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::HistoryAppended)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Start => "start",
            PipelineStage::Retrieved => "retrieved",
            PipelineStage::Ranked => "ranked",
            PipelineStage::PromptBuilt => "prompt_built",
            PipelineStage::Generated => "generated",
            PipelineStage::GuardrailChecked => "guardrail_checked",
            PipelineStage::Validated => "validated",
            PipelineStage::HistoryAppended => "history_appended",
        }
    }

    /// Human-readable name of the work that produces this stage.
    pub fn activity(&self) -> &'static str {
        match self {
            PipelineStage::Start => "Starting",
            PipelineStage::Retrieved => "Retrieving patient records",
            PipelineStage::Ranked => "Reranking records",
            PipelineStage::PromptBuilt => "Composing prompt",
            PipelineStage::Generated => "Generating answer",
            PipelineStage::GuardrailChecked => "Checking guardrails",
            PipelineStage::Validated => "Validating answer",
            PipelineStage::HistoryAppended => "Updating history",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
