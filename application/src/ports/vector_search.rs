//! Vector search port
//!
//! Defines the interface to the similarity-search collaborator. Encoding the
//! query into the index's vector space is part of the collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during vector search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Index is corrupt: {0}")]
    CorruptIndex(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Dimension mismatch: index has {expected}, query has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// One nearest-neighbour hit: position in the index and its raw distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub index: usize,
    pub distance: f32,
}

impl SearchHit {
    pub fn new(index: usize, distance: f32) -> Self {
        Self { index, distance }
    }
}

/// Stored identifier and summary for one indexed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    pub summary: String,
}

/// Port for k-nearest-neighbour search over patient-record summaries.
#[async_trait]
pub trait VectorSearchPort: Send + Sync {
    /// Encode `query` and return up to `k` hits in the index's own order.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError>;

    /// Look up the stored record at `index`.
    async fn record(&self, index: usize) -> Result<Option<PatientRecord>, SearchError>;
}
