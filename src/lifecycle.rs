//! Process lifecycle: logging, state construction and shutdown.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::commands::AppState;
use crate::config::AppConfig;
use crate::service::{LeadService, SeoAuditor};

/// Initialize logging with tracing_subscriber.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,seo_audit=debug")),
        )
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

/// Build the shared handler state. HTTP clients are created once here.
pub fn build_state(config: &AppConfig) -> Result<Arc<AppState>> {
    let auditor = SeoAuditor::from_config(config).context("Failed to build auditor")?;
    let leads = LeadService::new(config.lead.clone()).context("Failed to build lead service")?;

    tracing::info!(
        "Services ready (proxy: {}, unlocker api: {}, serp: {}, webhook: {})",
        config.fetcher.has_proxy(),
        config.fetcher.has_unlocker_api(),
        config.serp.is_configured(),
        config.lead.is_configured()
    );

    Ok(Arc::new(AppState {
        auditor: Arc::new(auditor),
        leads,
    }))
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
