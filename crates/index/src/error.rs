use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("ANN index error: {0}")]
    Ann(String),

    #[error("no index found at {0}")]
    NotFound(PathBuf),

    #[error("cannot build an index from zero chunks")]
    Empty,

    #[error("chunk/embedding count mismatch: {chunks} chunks, {embeddings} embeddings")]
    CountMismatch { chunks: usize, embeddings: usize },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
