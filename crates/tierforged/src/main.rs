//! Tierforge Daemon - differentiated GCSE task generation service.
//!
//! Serves the generation endpoint and proxies prompts to the upstream
//! completion model.

use std::sync::Arc;

use anyhow::Result;
use tierforged::config::Config;
use tierforged::llm::{HttpCompletionClient, RetryingClient};
use tierforged::server::{self, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("tierforged v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let http = HttpCompletionClient::new(config.llm.clone())?;
    let llm = Arc::new(RetryingClient::new(http, config.llm.retry_once));
    let state = AppState::new(config, llm);

    server::run(state).await
}
