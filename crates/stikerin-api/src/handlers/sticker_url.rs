use crate::error::HttpAppError;
use crate::handlers::render_sticker;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use stikerin_core::MediaSource;

#[derive(Debug, Deserialize)]
pub struct StickerUrlQuery {
    pub url: Option<String>,
}

/// `GET /?url=` - convert the media behind a URL
#[tracing::instrument(skip_all)]
pub async fn sticker_from_url(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StickerUrlQuery>,
) -> Result<Response, HttpAppError> {
    tracing::debug!(url = query.url.as_deref().unwrap_or_default(), "Sticker requested from url");
    let source = MediaSource::from_parts(None, query.url)?;
    render_sticker(&state, source).await
}
