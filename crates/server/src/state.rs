use std::sync::Arc;

use anyhow::Context;

use answerbox_core::Config;
use answerbox_index::VectorIndex;
use answerbox_ingest::{Embedder, OllamaEmbedder};
use answerbox_llm::{Generator, OllamaGenerator, SamplingOptions};

use crate::retriever::Retriever;

/// Everything a request handler needs, constructed once at startup and
/// shared read-only behind an `Arc`.
pub struct AppState {
    pub retriever: Retriever,
    pub generator: Generator,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let index = VectorIndex::load(&config.index.index_dir).with_context(|| {
            format!(
                "failed to load vector index from {} (run index-builder first)",
                config.index.index_dir.display()
            )
        })?;

        // Same model and dimensionality as the index builder, or similarity
        // search is meaningless.
        let embedder: Arc<dyn Embedder> = Arc::new(OllamaEmbedder::new(
            config.ollama.url.clone(),
            config.ollama.embedding_model.clone(),
            config.embedding.dimensions,
        ));
        let retriever = Retriever::new(index, embedder, config.retrieval.top_k);

        let sampling = if config.generation.do_sample {
            SamplingOptions::sampled(config.generation.temperature, config.generation.top_p)
        } else {
            SamplingOptions::greedy()
        };
        let provider = Arc::new(OllamaGenerator::new(
            config.ollama.url.clone(),
            config.ollama.model.clone(),
        ));
        let generator = Generator::new(provider, sampling, config.generation.max_input_tokens);

        Ok(Self { retriever, generator })
    }
}
