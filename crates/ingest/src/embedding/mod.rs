pub mod ollama;
pub mod traits;

pub use ollama::OllamaEmbedder;
pub use traits::{Embedder, EmbeddingError};
