//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.max_upload_size_bytes;

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = Uuid::new_v4();
        tracing::info_span!(
            "http_request",
            %request_id,
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .route("/", get(handlers::sticker_from_url))
        .route("/upload", post(handlers::sticker_from_upload))
        .route("/health", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(trace_layer)
        .with_state(state)
}
