use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{any, get};
use tokio::net::TcpListener;
use tracing::info;

use crate::handlers::{self, SharedState};

/// All routes. The `/api/*` handlers see every method so they can answer
/// non-POST requests with the JSON envelope instead of a bare 405.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/grid", any(handlers::grid::handle))
        .route("/api/recap", any(handlers::recap::handle))
        .route("/api/recap-social", any(handlers::social::handle))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// Serve until Ctrl+C.
pub async fn serve(addr: SocketAddr, state: SharedState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .context("server error")?;
    Ok(())
}
