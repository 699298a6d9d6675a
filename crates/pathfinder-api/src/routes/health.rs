//! Liveness probe.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: &'static str,
    /// Crate version of the running build.
    pub version: &'static str,
}

const HEALTHY: HealthResponse = HealthResponse {
    status: "ok",
    version: env!("CARGO_PKG_VERSION"),
};

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HEALTHY)
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
