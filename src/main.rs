// src/main.rs

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use seo_audit::commands;
use seo_audit::config::AppConfig;
use seo_audit::lifecycle;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load_with_dotenv().context("Failed to load configuration")?;
    lifecycle::init_logging();

    let state = lifecycle::build_state(&config)?;
    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, commands::router(state))
        .with_graceful_shutdown(lifecycle::shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
