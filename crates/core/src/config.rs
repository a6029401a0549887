use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_f32(key: &str, default: f32) -> f32 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub index: IndexConfig,
    pub ollama: OllamaConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub generation: GenerationConfig,
    pub corpus: CorpusConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            index: IndexConfig::from_env(),
            ollama: OllamaConfig::from_env(),
            embedding: EmbeddingConfig::from_env(),
            retrieval: RetrievalConfig::from_env(),
            generation: GenerationConfig::from_env(),
            corpus: CorpusConfig::from_env(),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:     {}:{}", self.server.host, self.server.port);
        tracing::info!("  index:      dir={}", self.index.index_dir.display());
        tracing::info!(
            "  ollama:     url={}, model={}, embedding_model={}",
            self.ollama.url,
            self.ollama.model,
            self.ollama.embedding_model
        );
        tracing::info!(
            "  embedding:  dimensions={}, batch_size={}",
            self.embedding.dimensions,
            self.embedding.batch_size
        );
        tracing::info!("  retrieval:  top_k={}", self.retrieval.top_k);
        tracing::info!(
            "  generation: do_sample={}, max_input_tokens={}",
            self.generation.do_sample,
            self.generation.max_input_tokens
        );
        tracing::info!(
            "  corpus:     dir={}, text_column={}, chunk_size={}",
            self.corpus.corpus_dir.display(),
            self.corpus.text_column,
            self.corpus.chunk_size
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8000),
        }
    }
}

// ── Vector index ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory holding the persisted index files.
    pub index_dir: PathBuf,
}

impl IndexConfig {
    fn from_env() -> Self {
        Self {
            index_dir: PathBuf::from(env_or("INDEX_DIR", "data/index")),
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub embedding_model: String,
}

impl OllamaConfig {
    fn from_env() -> Self {
        Self {
            url: env_or("OLLAMA_URL", "http://localhost:11434"),
            model: env_or("OLLAMA_MODEL", "llama3.2"),
            embedding_model: env_or("OLLAMA_EMBEDDING_MODEL", "nomic-embed-text"),
        }
    }
}

// ── Embedding ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Must match the dimensionality of the configured embedding model.
    pub dimensions: usize,
    pub batch_size: usize,
}

impl EmbeddingConfig {
    fn from_env() -> Self {
        Self {
            dimensions: env_usize("EMBEDDING_DIMENSIONS", 768),
            batch_size: env_usize("EMBEDDING_BATCH_SIZE", 64),
        }
    }
}

// ── Retrieval ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    pub top_k: usize,
}

impl RetrievalConfig {
    fn from_env() -> Self {
        Self {
            top_k: env_usize("RETRIEVAL_TOP_K", 4),
        }
    }
}

// ── Generation ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub do_sample: bool,
    pub temperature: f32,
    pub top_p: f32,
    /// Input budget for the formatted prompt, counted in whitespace words.
    pub max_input_tokens: usize,
}

impl GenerationConfig {
    fn from_env() -> Self {
        Self {
            do_sample: env_bool("GENERATION_DO_SAMPLE", true),
            temperature: env_f32("GENERATION_TEMPERATURE", 0.7),
            top_p: env_f32("GENERATION_TOP_P", 0.9),
            max_input_tokens: env_usize("GENERATION_MAX_INPUT_TOKENS", 512),
        }
    }
}

// ── Corpus (index builder input) ──────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub corpus_dir: PathBuf,
    /// Column holding document text in the source CSV files.
    pub text_column: String,
    /// Maximum words per chunk.
    pub chunk_size: usize,
}

impl CorpusConfig {
    fn from_env() -> Self {
        Self {
            corpus_dir: PathBuf::from(env_or("CORPUS_DIR", "data/documents")),
            text_column: env_or("TEXT_COLUMN", "text"),
            chunk_size: env_usize("CHUNK_SIZE", 500),
        }
    }
}
