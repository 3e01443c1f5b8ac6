//! HTTP server startup and graceful shutdown.

use crate::config::AppConfig;
use crate::lifecycle::OrderSystem;
use crate::web::{router, AppState};
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Starts the actors, serves until Ctrl-C, then drains connections and stops the actors.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let system = OrderSystem::new(&config.store);
    let app = router(AppState::new(&system));

    let bind_address = config.server.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    info!("Order desk listening on {}", listener.local_addr()?);

    // The router (and every client clone in its state) is dropped when serve returns,
    // which lets the actors see their channels close.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
