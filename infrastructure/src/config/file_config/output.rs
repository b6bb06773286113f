//! `[output]` section: how finished turns are printed

use medguard_domain::OutputFormat;
use serde::{Deserialize, Serialize};

pub use medguard_domain::OutputFormat as FileOutputFormat;

/// Presentation of answers and safety verdicts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// "full", "answer", or "json". Unset picks a per-mode default.
    pub format: Option<OutputFormat>,
    /// Color the SAFE/FLAGGED and APPROVED/REJECTED verdicts
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Format for one mode. A single question shows the whole turn; chat
    /// turns show only the answer and its verdicts unless configured.
    pub fn format_for(&self, chat: bool) -> OutputFormat {
        match (self.format, chat) {
            (Some(format), _) => format,
            (None, true) => OutputFormat::Answer,
            (None, false) => OutputFormat::Full,
        }
    }
}
