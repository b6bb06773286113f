//! Retrieval stage: query → ranked candidate chunks.

use super::types::PipelineError;
use crate::ports::vector_search::VectorSearchPort;
use crate::use_cases::shared::{timed_out, with_timeout};
use medguard_domain::{Chunk, Query};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Retrieves candidate patient-record chunks from vector search.
pub struct Retriever {
    search: Arc<dyn VectorSearchPort>,
    timeout: Option<Duration>,
}

impl Retriever {
    pub fn new(search: Arc<dyn VectorSearchPort>) -> Self {
        Self {
            search,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Return up to `k` chunks in the index's similarity order.
    ///
    /// Chunk ranks are the 1-based result positions and scores are the raw
    /// distances. A blank query fails with [`PipelineError::EmptyQuery`]
    /// before the collaborator is called.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Chunk>, PipelineError> {
        let query = Query::try_new(query)?;

        with_timeout(self.timeout, self.search_chunks(query.content(), k))
            .await
            .map_err(|limit| PipelineError::RetrievalUnavailable(timed_out(limit)))?
    }

    async fn search_chunks(&self, query: &str, k: usize) -> Result<Vec<Chunk>, PipelineError> {
        let hits = self
            .search
            .search(query, k)
            .await
            .map_err(|e| PipelineError::RetrievalUnavailable(e.to_string()))?;

        let mut chunks = Vec::with_capacity(hits.len().min(k));
        for hit in hits.into_iter().take(k) {
            let record = self
                .search
                .record(hit.index)
                .await
                .map_err(|e| PipelineError::RetrievalUnavailable(e.to_string()))?
                .ok_or_else(|| {
                    PipelineError::RetrievalUnavailable(format!(
                        "no stored record for index {}",
                        hit.index
                    ))
                })?;
            chunks.push(Chunk::new(
                chunks.len() + 1,
                record.patient_id,
                record.summary,
                hit.distance,
            ));
        }

        debug!("Retrieved {} chunks (k = {})", chunks.len(), k);
        Ok(chunks)
    }
}
