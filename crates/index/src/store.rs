//! Persisted vector index: a hora HNSW graph plus a JSON sidecar with the
//! chunk texts.
//!
//! The graph file's binary layout belongs to hora (`SerializableIndex`
//! dump/load); only the sidecar is owned by this crate. Built once offline,
//! loaded once at server startup, read-only afterwards.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use hora::core::ann_index::{ANNIndex, SerializableIndex};
use hora::core::metrics::Metric;
use hora::index::hnsw_idx::HNSWIndex;
use hora::index::hnsw_params::HNSWParams;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::IndexError;

const GRAPH_FILE: &str = "index.hnsw";
const SIDECAR_FILE: &str = "chunks.json";

/// A chunk returned by a similarity search. `index` is the chunk's position
/// in the stored order (the only identity chunks have).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub index: usize,
    pub text: String,
}

#[derive(Serialize, Deserialize)]
struct Sidecar {
    dimensions: usize,
    chunks: Vec<String>,
}

pub struct VectorIndex {
    index: HNSWIndex<f32, usize>,
    chunks: Vec<String>,
    dimensions: usize,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("chunks", &self.chunks)
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}

impl VectorIndex {
    /// Build an in-memory index from parallel chunk and embedding
    /// collections. Embeddings must all have the same dimensionality.
    pub fn build(
        chunks: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        dimensions: usize,
    ) -> Result<Self, IndexError> {
        if chunks.is_empty() {
            return Err(IndexError::Empty);
        }
        if chunks.len() != embeddings.len() {
            return Err(IndexError::CountMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        let mut index = HNSWIndex::<f32, usize>::new(dimensions, &HNSWParams::<f32>::default());
        for (i, embedding) in embeddings.iter().enumerate() {
            if embedding.len() != dimensions {
                return Err(IndexError::DimensionMismatch {
                    expected: dimensions,
                    actual: embedding.len(),
                });
            }
            index.add(embedding, i).map_err(|e| IndexError::Ann(e.to_string()))?;
        }
        index
            .build(Metric::CosineSimilarity)
            .map_err(|e| IndexError::Ann(e.to_string()))?;

        Ok(Self { index, chunks, dimensions })
    }

    /// Persist the index to `dir` (graph blob + sidecar).
    pub fn save(&mut self, dir: &Path) -> Result<(), IndexError> {
        std::fs::create_dir_all(dir)?;

        let graph_path = dir.join(GRAPH_FILE);
        self.index
            .dump(&graph_path.to_string_lossy())
            .map_err(|e| IndexError::Ann(e.to_string()))?;

        let sidecar = Sidecar {
            dimensions: self.dimensions,
            chunks: self.chunks.clone(),
        };
        let file = File::create(dir.join(SIDECAR_FILE))?;
        serde_json::to_writer(BufWriter::new(file), &sidecar)?;

        info!("Saved index with {} chunks to {}", self.chunks.len(), dir.display());
        Ok(())
    }

    /// Load a previously saved index from `dir`.
    pub fn load(dir: &Path) -> Result<Self, IndexError> {
        let graph_path = dir.join(GRAPH_FILE);
        let sidecar_path = dir.join(SIDECAR_FILE);
        if !graph_path.is_file() || !sidecar_path.is_file() {
            return Err(IndexError::NotFound(dir.to_path_buf()));
        }

        let file = File::open(sidecar_path)?;
        let sidecar: Sidecar = serde_json::from_reader(BufReader::new(file))?;

        let index = HNSWIndex::<f32, usize>::load(&graph_path.to_string_lossy())
            .map_err(|e| IndexError::Ann(e.to_string()))?;

        info!(
            "Loaded index with {} chunks ({} dims) from {}",
            sidecar.chunks.len(),
            sidecar.dimensions,
            dir.display()
        );
        Ok(Self {
            index,
            chunks: sidecar.chunks,
            dimensions: sidecar.dimensions,
        })
    }

    /// Nearest-neighbor search. Results are ranked by similarity; fewer than
    /// `top_k` (including zero) may come back.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<RetrievedChunk>, IndexError> {
        if query.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let ids = self.index.search(query, top_k);
        Ok(ids
            .into_iter()
            .filter_map(|id| {
                self.chunks.get(id).map(|text| RetrievedChunk {
                    index: id,
                    text: text.clone(),
                })
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: usize = 4;

    fn sample_index() -> VectorIndex {
        let chunks = vec![
            "alpha chunk".to_string(),
            "beta chunk".to_string(),
            "gamma chunk".to_string(),
        ];
        let embeddings = vec![
            vec![1.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
        ];
        VectorIndex::build(chunks, embeddings, DIMS).unwrap()
    }

    #[test]
    fn search_ranks_nearest_first() {
        let index = sample_index();
        let hits = index.search(&[0.9, 0.1, 0.0, 0.0], 3).unwrap();
        assert!(!hits.is_empty());
        assert_eq!(hits[0].text, "alpha chunk");
        assert_eq!(hits[0].index, 0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = sample_index();
        index.save(dir.path()).unwrap();

        let loaded = VectorIndex::load(dir.path()).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.dimensions(), DIMS);

        let hits = loaded.search(&[0.0, 0.0, 0.95, 0.05], 1).unwrap();
        assert_eq!(hits[0].text, "gamma chunk");
    }

    #[test]
    fn load_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = VectorIndex::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, IndexError::NotFound(_)));
    }

    #[test]
    fn query_dimension_is_checked() {
        let index = sample_index();
        let err = index.search(&[1.0, 0.0], 1).unwrap_err();
        assert!(matches!(
            err,
            IndexError::DimensionMismatch { expected: DIMS, actual: 2 }
        ));
    }

    #[test]
    fn zero_chunks_cannot_build() {
        let err = VectorIndex::build(Vec::new(), Vec::new(), DIMS).unwrap_err();
        assert!(matches!(err, IndexError::Empty));
    }

    #[test]
    fn mismatched_counts_cannot_build() {
        let err = VectorIndex::build(
            vec!["only chunk".to_string()],
            vec![vec![0.0; DIMS], vec![0.0; DIMS]],
            DIMS,
        )
        .unwrap_err();
        assert!(matches!(err, IndexError::CountMismatch { chunks: 1, embeddings: 2 }));
    }
}
