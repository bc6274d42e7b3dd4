use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: &'static str,
    pub scratch_dir: String,
}

/// `GET /health` - liveness plus a scratch directory check
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let scratch_dir = &state.config.sticker.scratch_dir;

    let (status, scratch) = match tokio::fs::create_dir_all(scratch_dir).await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::error!(error = %e, path = %scratch_dir.display(), "Scratch directory unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let response = HealthCheckResponse {
        status: if status.is_success() { "ok" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION"),
        scratch_dir: scratch.to_string(),
    };

    (status, Json(response))
}
