//! folio-desk server entry point.
//!
//! Starts the Axum HTTP server with the contact and admin REST endpoints.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use folio_desk::api;
use folio_desk::app_state::AppState;
use folio_desk::config::{AppConfig, LogFormat};
use folio_desk::persistence::{InMemoryMessageStore, MessageStore, PostgresMessageStore};
use folio_desk::service::Notifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting folio-desk");

    // Build persistence layer
    let store: Arc<dyn MessageStore> = if config.persistence_enabled {
        let store = PostgresMessageStore::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        Arc::new(store)
    } else {
        tracing::warn!("PERSISTENCE_ENABLED is false; messages are kept in memory only");
        Arc::new(InMemoryMessageStore::new())
    };
    tracing::info!(backend = store.backend(), "message store ready");

    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN is not set; /api/admin is open to every caller");
    }

    // Build application state and background workers
    let app_state = AppState::new(&config, store);
    let notifier = Notifier::new(config.notify_recipient.clone()).spawn(&app_state.event_bus);

    let app = api::build_app(app_state, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and with it the last bus sender) is gone; let the
    // notifier drain.
    if let Err(e) = notifier.await {
        tracing::error!(error = %e, "notifier task failed");
    }
    tracing::info!("shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
