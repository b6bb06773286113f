//! Record search over a lazily loaded [`FlatIndex`].

use super::embedding::EmbeddingProvider;
use super::flat_index::FlatIndex;
use async_trait::async_trait;
use medguard_application::ports::vector_search::{
    PatientRecord, SearchError, SearchHit, VectorSearchPort,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// [`VectorSearchPort`] adapter: encode the query, then search the index.
///
/// The index file is read on first use and held for the life of the
/// process. A failed load is not cached, so a later turn retries it.
pub struct IndexedRecordSearch {
    path: PathBuf,
    embedder: Arc<dyn EmbeddingProvider>,
    index: OnceCell<FlatIndex>,
}

impl IndexedRecordSearch {
    pub fn new(path: impl Into<PathBuf>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            path: path.into(),
            embedder,
            index: OnceCell::new(),
        }
    }

    async fn index(&self) -> Result<&FlatIndex, SearchError> {
        self.index
            .get_or_try_init(|| FlatIndex::load(&self.path))
            .await
    }
}

#[async_trait]
impl VectorSearchPort for IndexedRecordSearch {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError> {
        let index = self.index().await?;
        let embedding = self.embedder.embed(query).await?;
        let hits = index.search(&embedding, k)?;
        debug!(k, hits = hits.len(), "Index search complete");
        Ok(hits)
    }

    async fn record(&self, index: usize) -> Result<Option<PatientRecord>, SearchError> {
        Ok(self.index().await?.record(index).cloned())
    }
}
