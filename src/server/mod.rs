// src/server/mod.rs
//! HTTP server: router assembly, static file serving, and lifecycle.

pub mod error;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::CONFIG;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_router = Router::new().route("/analyze", post(handlers::analyze));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_router)
        .fallback_service(ServeDir::new(&CONFIG.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Leave headroom over the analysis timeout so upstream errors
        // surface as 502s rather than dropped connections.
        .layer(TimeoutLayer::new(Duration::from_secs(
            CONFIG.gemini_timeout + 15,
        )))
        .with_state(state)
}

/// Bind the given address and serve until shutdown.
pub async fn serve(state: Arc<AppState>, bind: &str) -> anyhow::Result<()> {
    if CONFIG.is_debug() {
        debug!("Loaded config: {:?}", *CONFIG);
    }

    let app = create_router(state);
    let listener = TcpListener::bind(bind).await?;
    let addr = listener.local_addr()?;

    info!("🚀 lookrate listening on http://{}", addr);
    info!("🎨 Serving static files from {}/", CONFIG.static_dir);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for a shutdown signal (ctrl-c or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}
