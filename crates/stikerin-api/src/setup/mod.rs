//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use stikerin_core::Config;

/// Initialize telemetry, application state and routes
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry()?;

    tracing::info!(
        environment = %config.server.environment,
        "Configuration loaded and validated successfully"
    );

    let state = Arc::new(AppState::new(config).context("Failed to build sticker pipeline")?);
    let router = routes::build_router(state.clone());

    Ok((state, router))
}
