mod api;
mod pipeline;
mod retriever;
mod router;
mod state;


use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use answerbox_core::Config;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    answerbox_core::config::load_dotenv();
    let config = Config::from_env();
    config.log_summary();

    // Startup precondition: never serve against a missing or corrupt index.
    let state = Arc::new(AppState::from_config(&config)?);
    info!(
        "Index ready: {} chunks ({} dims)",
        state.retriever.chunk_count(),
        state.retriever.dimensions()
    );

    let app = router::build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
