pub mod builder;
pub mod corpus;
pub mod embedding;
pub mod preprocess;

pub use builder::{build_index, BuildSummary};
pub use embedding::{Embedder, EmbeddingError, OllamaEmbedder};
