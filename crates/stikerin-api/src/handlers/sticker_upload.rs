use crate::error::HttpAppError;
use crate::handlers::render_sticker;
use crate::state::AppState;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;
use stikerin_core::{MediaSource, StickerError};

/// Multipart field carrying the media
const FILE_FIELD: &str = "file";

/// `POST /upload` - convert an uploaded file
#[tracing::instrument(skip_all)]
pub async fn sticker_from_upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    // A request that is not multipart at all has no file in it
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "Upload without a multipart body");
        StickerError::MissingInput
    })?;

    let file = match read_file_field(multipart).await {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read multipart upload");
            return Ok((e.status(), e.body_text()).into_response());
        }
    };

    if let Some(ref data) = file {
        tracing::debug!(size = data.len(), "Received upload");
    }

    let source = MediaSource::from_parts(file, None)?;
    render_sticker(&state, source).await
}

/// Contents of the first `file` field, other fields are skipped
async fn read_file_field(mut multipart: Multipart) -> Result<Option<Bytes>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            return field.bytes().await.map(Some);
        }
    }
    Ok(None)
}
