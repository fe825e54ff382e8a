//! Backend proxy: exposes the `wohnungen` table over HTTP.

pub mod error;
pub mod routes;

pub use error::ApiError;

use crate::config::ServerConfig;
use crate::sources::RowStore;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Rows returned by one listings request
pub const ROW_LIMIT: i64 = 50;

pub struct AppState {
    pub rows: Arc<dyn RowStore>,
    pub row_limit: i64,
}

impl AppState {
    pub fn new(rows: Arc<dyn RowStore>) -> Self {
        Self {
            rows,
            row_limit: ROW_LIMIT,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    routes::router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and run until the process is stopped
pub async fn serve(config: &ServerConfig, state: Arc<AppState>) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("🏠 API listening on http://{}", addr);
    axum::serve(listener, router(state))
        .await
        .context("Server error")
}
