//! Index and logging configuration from TOML (`[index]` and `[logging]` sections)

use serde::{Deserialize, Serialize};

/// Location of the patient-record index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIndexConfig {
    /// JSON index file with record embeddings
    pub path: Option<String>,
}

/// Log destinations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one record per finished run
    pub run_log: Option<String>,
    /// Directory for daily-rolling diagnostic logs
    pub dir: Option<String>,
}
