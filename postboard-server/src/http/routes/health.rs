//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub version: &'static str,
}

/// GET /health - reports whether the store answers a trivial query
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let store_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    if !store_ok {
        tracing::warn!("health check: store unavailable");
    }

    let (status, code) = if store_ok {
        ("ok", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        code,
        Json(HealthResponse {
            status,
            store: if store_ok { "ok" } else { "unavailable" },
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
