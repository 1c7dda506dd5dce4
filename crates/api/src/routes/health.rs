//! Health check route, mounted at the root (outside `/api/v1`).

use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

/// Routes mounted at `/`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
///
/// Liveness probe; reports the service name and version.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "codabrate-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
