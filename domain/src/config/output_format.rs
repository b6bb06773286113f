//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished pipeline turn is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Answer, ranked records, both safety verdicts, and history (default)
    #[default]
    Full,
    /// Answer plus the two safety verdicts
    Answer,
    /// The entire pipeline state as JSON
    Json,
}
