//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; any
//! `StickerError` converts with `?` and renders as a JSON `ErrorResponse`
//! with the status its `ErrorMetadata` names.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stikerin_core::{ErrorMetadata, LogLevel, StickerError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
}

/// Wrapper type for StickerError to implement IntoResponse
#[derive(Debug)]
pub struct HttpAppError(pub StickerError);

impl From<StickerError> for HttpAppError {
    fn from(err: StickerError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &StickerError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type = error_type,
                "Error occurred"
            );
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl HttpAppError {
    fn body(&self, is_production: bool) -> ErrorResponse {
        let err = &self.0;

        // Details never leave the process in production or for sensitive errors
        let (details, error_type) = if is_production || err.is_sensitive() {
            (None, None)
        } else {
            (
                Some(err.detailed_message()),
                Some(err.error_type().to_string()),
            )
        };

        ErrorResponse {
            error: err.client_message(),
            details,
            error_type,
            code: err.error_code().to_string(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        (status, Json(self.body(is_production_env()))).into_response()
    }
}
