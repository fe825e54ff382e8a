use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failures reported to HTTP clients; details stay in the server log
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Fehler beim Laden der Wohnungen")]
    Listings,
    #[error("{0}")]
    Database(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::Listings => json!({ "error": self.to_string() }),
            ApiError::Database(message) => json!({ "ok": false, "error": message }),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
