//! `[repl]` section: multi-turn chat settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Chat-mode settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a stage spinner while each turn runs
    pub show_progress: bool,
    /// Where typed questions are remembered between sessions.
    /// A leading `~/` is expanded to the home directory.
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl FileReplConfig {
    /// Configured question-history path, with `~/` expanded.
    pub fn history_path(&self) -> Option<PathBuf> {
        let raw = self.history_file.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        }
    }
}
