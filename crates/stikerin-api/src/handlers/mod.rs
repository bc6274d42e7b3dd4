pub mod health;
pub mod sticker_upload;
pub mod sticker_url;

pub use health::health_check;
pub use sticker_upload::sticker_from_upload;
pub use sticker_url::sticker_from_url;

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use stikerin_core::MediaSource;
use tokio_util::sync::CancellationToken;

/// Run the pipeline for one request and render the sticker.
///
/// The token is cancelled when this future is dropped, which happens when
/// the client goes away mid-request.
async fn render_sticker(state: &AppState, source: MediaSource) -> Result<Response, HttpAppError> {
    let cancel = CancellationToken::new();
    let guard = cancel.clone().drop_guard();

    let sticker = state.pipeline.process(source, &cancel).await?;
    guard.disarm();

    Ok(([(header::CONTENT_TYPE, sticker.content_type)], sticker.data).into_response())
}
