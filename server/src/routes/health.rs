//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the engine does not answer
    pub status: &'static str,
    pub engine: &'static str,
    pub version: &'static str,
}

/// Create health routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
}

/// Health check handler. Always 200; the body says whether the engine is up.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, engine) = match state.store.ping().await {
        Ok(()) => ("ok", "up"),
        Err(e) => {
            tracing::warn!("Engine ping failed: {}", e);
            ("degraded", "down")
        }
    };

    Json(HealthResponse {
        status,
        engine,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Root handler.
async fn root() -> &'static str {
    "Docfront Server - see /redis/keys, /redis/jsonGet, /redis/jsonSet, /redis/jsonFind"
}
