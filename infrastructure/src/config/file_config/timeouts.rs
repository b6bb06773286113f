//! Timeout configuration from TOML (`[timeouts]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw timeout configuration in seconds (0 disables the timeout)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    pub retrieval_secs: u64,
    pub generation_secs: u64,
    pub validation_secs: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        Self {
            retrieval_secs: 30,
            generation_secs: 120,
            validation_secs: 120,
        }
    }
}

fn to_duration(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

impl FileTimeoutsConfig {
    pub fn retrieval(&self) -> Option<Duration> {
        to_duration(self.retrieval_secs)
    }

    pub fn generation(&self) -> Option<Duration> {
        to_duration(self.generation_secs)
    }

    pub fn validation(&self) -> Option<Duration> {
        to_duration(self.validation_secs)
    }
}
