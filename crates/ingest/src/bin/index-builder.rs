//! index-builder: one-shot offline construction of the vector index from a
//! directory of CSV documents.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use answerbox_core::Config;
use answerbox_ingest::{build_index, OllamaEmbedder};

/// Build the vector index consumed by answerbox-server.
#[derive(Parser, Debug)]
#[command(name = "index-builder", version, about)]
struct Cli {
    /// Directory of CSV source documents (overrides CORPUS_DIR).
    #[arg(long)]
    corpus_dir: Option<PathBuf>,

    /// Column holding document text (overrides TEXT_COLUMN).
    #[arg(long)]
    text_column: Option<String>,

    /// Maximum words per chunk (overrides CHUNK_SIZE).
    #[arg(long)]
    chunk_size: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    answerbox_core::config::load_dotenv();
    let mut config = Config::from_env();
    if let Some(dir) = cli.corpus_dir {
        config.corpus.corpus_dir = dir;
    }
    if let Some(column) = cli.text_column {
        config.corpus.text_column = column;
    }
    if let Some(size) = cli.chunk_size {
        config.corpus.chunk_size = size;
    }
    config.log_summary();

    let embedder = OllamaEmbedder::new(
        config.ollama.url.clone(),
        config.ollama.embedding_model.clone(),
        config.embedding.dimensions,
    );

    match build_index(&config, &embedder).await? {
        Some(summary) => info!(
            "Index built: {} chunks -> {}",
            summary.chunks,
            config.index.index_dir.display()
        ),
        None => warn!(
            "No chunks produced from {}; index not built",
            config.corpus.corpus_dir.display()
        ),
    }

    Ok(())
}
