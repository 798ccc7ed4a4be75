//! HTTP surface over the shared recommendation [`Runtime`].

mod error;
mod handlers;
mod types;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use smartpick_lib::runtime::Runtime;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::ApiError;
pub use types::{HealthResponse, MessageResponse, RecommendRequest, RecommendResponse};

/// Build the application router.
pub fn router(runtime: Arc<Runtime>) -> Router {
    Router::new()
        .route("/api/recommend", post(handlers::api_recommend))
        .route("/recommend", post(handlers::legacy_recommend))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(runtime)
}

/// Serve on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, runtime: Arc<Runtime>) -> anyhow::Result<()> {
    info!(addr = ?listener.local_addr().ok(), "HTTP server listening");
    axum::serve(listener, router(runtime))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Cannot listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
}
