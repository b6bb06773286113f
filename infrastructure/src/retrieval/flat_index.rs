//! Exact nearest-neighbour index over patient-record embeddings.
//!
//! The index file is JSON:
//!
//! ```json
//! {
//!   "dimensions": 384,
//!   "records": [
//!     { "patient_id": "p-001", "summary": "...", "embedding": [0.01, ...] }
//!   ]
//! }
//! ```

use medguard_application::ports::vector_search::{PatientRecord, SearchError, SearchHit};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Deserialize)]
struct IndexFile {
    dimensions: usize,
    records: Vec<IndexedRecord>,
}

#[derive(Deserialize)]
struct IndexedRecord {
    patient_id: String,
    summary: String,
    embedding: Vec<f32>,
}

/// In-memory flat L2 index. Read-only once loaded.
#[derive(Debug)]
pub struct FlatIndex {
    dimensions: usize,
    records: Vec<PatientRecord>,
    embeddings: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Read and parse an index file.
    pub async fn load(path: &Path) -> Result<Self, SearchError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SearchError::IndexUnavailable(format!("{}: {}", path.display(), e))
        })?;
        let index = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            records = index.len(),
            dimensions = index.dimensions,
            "Loaded record index"
        );
        Ok(index)
    }

    /// Parse an index from JSON text, checking every embedding's width.
    pub fn from_json(content: &str) -> Result<Self, SearchError> {
        let file: IndexFile = serde_json::from_str(content)
            .map_err(|e| SearchError::CorruptIndex(e.to_string()))?;

        if file.dimensions == 0 {
            return Err(SearchError::CorruptIndex(
                "dimensions must be positive".to_string(),
            ));
        }

        let mut records = Vec::with_capacity(file.records.len());
        let mut embeddings = Vec::with_capacity(file.records.len());
        for (i, record) in file.records.into_iter().enumerate() {
            if record.embedding.len() != file.dimensions {
                return Err(SearchError::CorruptIndex(format!(
                    "record {} has {} dimensions, expected {}",
                    i,
                    record.embedding.len(),
                    file.dimensions
                )));
            }
            records.push(PatientRecord {
                patient_id: record.patient_id,
                summary: record.summary,
            });
            embeddings.push(record.embedding);
        }

        Ok(Self {
            dimensions: file.dimensions,
            records,
            embeddings,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `min(k, len)` nearest records by squared L2 distance, closest first.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, SearchError> {
        if query.len() != self.dimensions {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut hits: Vec<SearchHit> = self
            .embeddings
            .iter()
            .enumerate()
            .map(|(i, embedding)| SearchHit::new(i, squared_l2(query, embedding)))
            .collect();
        // Stable sort keeps insertion order among equal distances.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);
        Ok(hits)
    }

    pub fn record(&self, index: usize) -> Option<&PatientRecord> {
        self.records.get(index)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
