//! Offline index construction: corpus -> cleaned chunks -> embeddings ->
//! persisted vector index.
//!
//! Runs once, synchronously, to completion. The serving process never calls
//! into this module; it only loads the files this module writes.

use thiserror::Error;
use tracing::{info, warn};

use answerbox_core::Config;
use answerbox_index::{IndexError, VectorIndex};

use crate::corpus::{collect_chunks, CorpusError};
use crate::embedding::{Embedder, EmbeddingError};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),
}

#[derive(Debug)]
pub struct BuildSummary {
    pub chunks: usize,
}

/// Build and persist the vector index described by `cfg`.
///
/// Returns `Ok(None)` when the corpus yields zero chunks: a reportable
/// outcome, not a process failure, and nothing is written.
pub async fn build_index(
    cfg: &Config,
    embedder: &dyn Embedder,
) -> Result<Option<BuildSummary>, BuildError> {
    let chunks = collect_chunks(&cfg.corpus)?;
    info!(
        "Collected {} chunks from {}",
        chunks.len(),
        cfg.corpus.corpus_dir.display()
    );

    if chunks.is_empty() {
        warn!("No chunks were produced; check the input data");
        return Ok(None);
    }

    let mut embeddings = Vec::with_capacity(chunks.len());
    for batch in chunks.chunks(cfg.embedding.batch_size.max(1)) {
        let texts: Vec<&str> = batch.iter().map(String::as_str).collect();
        embeddings.extend(embedder.embed_batch(&texts).await?);
    }
    info!("Generated {} embeddings", embeddings.len());

    let chunk_count = chunks.len();
    let mut index = VectorIndex::build(chunks, embeddings, embedder.dimensions())?;
    index.save(&cfg.index.index_dir)?;

    Ok(Some(BuildSummary { chunks: chunk_count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::fs;

    const DIMS: usize = 8;

    /// Deterministic stand-in embedder: one hot-ish vector per text length.
    struct FakeEmbedder;

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(texts
                .iter()
                .map(|t| {
                    let mut v = vec![0.0f32; DIMS];
                    v[t.len() % DIMS] = 1.0;
                    v[t.split_whitespace().count() % DIMS] += 0.5;
                    v
                })
                .collect())
        }

        fn dimensions(&self) -> usize {
            DIMS
        }
    }

    fn test_config(corpus_dir: &std::path::Path, index_dir: &std::path::Path) -> Config {
        let mut cfg = Config::from_env();
        cfg.corpus.corpus_dir = corpus_dir.to_path_buf();
        cfg.corpus.text_column = "text".to_string();
        cfg.corpus.chunk_size = 500;
        cfg.index.index_dir = index_dir.to_path_buf();
        cfg.embedding.batch_size = 2;
        cfg
    }

    #[tokio::test]
    async fn builds_and_persists_a_loadable_index() {
        let corpus = tempfile::tempdir().unwrap();
        let index_dir = tempfile::tempdir().unwrap();
        fs::write(
            corpus.path().join("docs.csv"),
            "text\nrust is a systems language\nollama serves local models\nvectors enable similarity search\n",
        )
        .unwrap();

        let cfg = test_config(corpus.path(), &index_dir.path().join("index"));
        let summary = build_index(&cfg, &FakeEmbedder).await.unwrap().unwrap();
        assert_eq!(summary.chunks, 3);

        let loaded = VectorIndex::load(&cfg.index.index_dir).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.dimensions(), DIMS);
    }

    #[tokio::test]
    async fn empty_corpus_builds_nothing() {
        let corpus = tempfile::tempdir().unwrap();
        let index_dir = tempfile::tempdir().unwrap();
        fs::write(corpus.path().join("empty.csv"), "").unwrap();

        let cfg = test_config(corpus.path(), &index_dir.path().join("index"));
        let summary = build_index(&cfg, &FakeEmbedder).await.unwrap();
        assert!(summary.is_none());
        assert!(!cfg.index.index_dir.exists());
    }
}
