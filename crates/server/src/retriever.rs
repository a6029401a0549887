use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use answerbox_index::{IndexError, RetrievedChunk, VectorIndex};
use answerbox_ingest::{Embedder, EmbeddingError};

#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("index search failed: {0}")]
    Index(#[from] IndexError),
}

/// Read-only similarity search over the loaded index.
pub struct Retriever {
    index: VectorIndex,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl Retriever {
    pub fn new(index: VectorIndex, embedder: Arc<dyn Embedder>, top_k: usize) -> Self {
        Self { index, embedder, top_k }
    }

    /// Embed the query and return the ranked nearest chunks. An empty result
    /// set is a valid outcome.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedChunk>, RetrieveError> {
        let vector = self.embedder.embed(query).await?;
        let hits = self.index.search(&vector, self.top_k)?;
        debug!("Retrieved {} chunks for query", hits.len());
        Ok(hits)
    }

    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }

    pub fn dimensions(&self) -> usize {
        self.index.dimensions()
    }
}
