use crate::models::ListingRow;
use crate::server::error::ApiError;
use crate::server::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/test-db", get(test_db))
        .route("/api/wohnungen", get(list_rows))
}

/// Connectivity probe: answers with the database clock
async fn test_db(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let now = state.rows.now().await.map_err(|e| {
        error!("Database error: {:#}", e);
        ApiError::Database(format!("{:#}", e))
    })?;
    Ok(Json(json!({ "ok": true, "time": now })))
}

async fn list_rows(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ListingRow>>, ApiError> {
    let rows = state.rows.fetch_rows(state.row_limit).await.map_err(|e| {
        error!("Database error: {:#}", e);
        ApiError::Listings
    })?;
    debug!("Serving {} rows", rows.len());
    Ok(Json(rows))
}
