//! Pipeline configuration from TOML (`[pipeline]` section)

use medguard_domain::{ConfigIssue, ConfigIssueCode, SpeculationMarkers};
use serde::{Deserialize, Serialize};

/// Raw pipeline configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Candidates requested from vector search
    pub retrieval_k: usize,
    /// Chunks kept after reranking
    pub rerank_top_k: usize,
    /// Most recent turns shown to the generator (0 = all)
    pub history_window: usize,
    /// Speculation marker list: "word" or "phrase"
    pub speculation_markers: String,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        Self {
            retrieval_k: 5,
            rerank_top_k: 5,
            history_window: 5,
            speculation_markers: "word".to_string(),
        }
    }
}

impl FilePipelineConfig {
    /// History window as used by the pipeline (`None` = all turns).
    pub fn history_window(&self) -> Option<usize> {
        (self.history_window > 0).then_some(self.history_window)
    }

    /// Parse the marker profile, falling back to the word list.
    pub fn parse_speculation_markers(&self) -> (SpeculationMarkers, Option<ConfigIssue>) {
        match self.speculation_markers.parse::<SpeculationMarkers>() {
            Ok(markers) => (markers, None),
            Err(_) => (
                SpeculationMarkers::Word,
                Some(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "pipeline.speculation_markers".to_string(),
                        value: self.speculation_markers.clone(),
                        valid_values: vec!["word".to_string(), "phrase".to_string()],
                    },
                    format!(
                        "pipeline.speculation_markers: unknown value '{}', falling back to 'word'",
                        self.speculation_markers
                    ),
                )),
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("pipeline.retrieval_k", self.retrieval_k),
            ("pipeline.rerank_top_k", self.rerank_top_k),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroValue {
                        field: field.to_string(),
                    },
                    format!("{field} must be at least 1"),
                ));
            }
        }

        if self.rerank_top_k > self.retrieval_k && self.retrieval_k > 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TopKExceedsRetrieval {
                    top_k: self.rerank_top_k,
                    retrieval_k: self.retrieval_k,
                },
                format!(
                    "pipeline.rerank_top_k ({}) exceeds pipeline.retrieval_k ({}); at most {} chunks will be ranked",
                    self.rerank_top_k, self.retrieval_k, self.retrieval_k
                ),
            ));
        }

        issues.extend(self.parse_speculation_markers().1);
        issues
    }
}
