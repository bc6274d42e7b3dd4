//! Error types module
//!
//! Every failure of the sticker pipeline is a terminal `StickerError` for
//! that request. Variants carry enough identity for the HTTP boundary to pick
//! a status code without inspecting messages.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like missing input
    Debug,
    /// Warning level - for bad input the caller can fix
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_MEDIA")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum StickerError {
    #[error("No media supplied: expected an uploaded file or a url")]
    MissingInput,

    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    #[error("Remote fetch returned status {status_code}")]
    RemoteFetch { status_code: u16 },

    #[error("Remote fetch failed: {0}")]
    Fetch(String),

    #[error("Unsupported media type: {mime}")]
    UnsupportedMedia { mime: String },

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Transcode failed: {message}")]
    Transcode {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StickerError {
    pub fn transcode(message: impl Into<String>) -> Self {
        StickerError::Transcode {
            message: message.into(),
            stderr: None,
            exit_code: None,
        }
    }

    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            StickerError::MissingInput => "MissingInput",
            StickerError::InvalidUrl(_) => "InvalidUrl",
            StickerError::RemoteFetch { .. } => "RemoteFetch",
            StickerError::Fetch(_) => "Fetch",
            StickerError::UnsupportedMedia { .. } => "UnsupportedMedia",
            StickerError::Encode(_) => "Encode",
            StickerError::Transcode { .. } => "Transcode",
            StickerError::Io(_) => "Io",
            StickerError::Cancelled => "Cancelled",
            StickerError::Internal(_) => "Internal",
        }
    }

    /// Get detailed error information including captured transcoder output
    pub fn detailed_message(&self) -> String {
        match self {
            StickerError::Transcode {
                message,
                stderr: Some(stderr),
                exit_code,
            } => {
                let code = exit_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string());
                format!("{} (exit: {})\n{}", message, code, stderr.trim())
            }
            other => other.to_string(),
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, sensitive, log_level).
fn sticker_error_static_metadata(err: &StickerError) -> (u16, &'static str, bool, bool, LogLevel) {
    match err {
        StickerError::MissingInput => (400, "MISSING_INPUT", false, false, LogLevel::Debug),
        StickerError::InvalidUrl(_) => (400, "INVALID_URL", false, false, LogLevel::Debug),
        StickerError::RemoteFetch { .. } => {
            (500, "REMOTE_FETCH_FAILED", false, false, LogLevel::Warn)
        }
        StickerError::Fetch(_) => (500, "REMOTE_FETCH_FAILED", true, false, LogLevel::Warn),
        StickerError::UnsupportedMedia { .. } => {
            (500, "UNSUPPORTED_MEDIA", false, false, LogLevel::Warn)
        }
        StickerError::Encode(_) => (500, "ENCODE_FAILED", false, false, LogLevel::Warn),
        StickerError::Transcode { .. } => (500, "TRANSCODE_FAILED", false, true, LogLevel::Error),
        StickerError::Io(_) => (500, "IO_ERROR", true, true, LogLevel::Error),
        StickerError::Cancelled => (500, "CANCELLED", true, false, LogLevel::Debug),
        StickerError::Internal(_) => (500, "INTERNAL_ERROR", true, true, LogLevel::Error),
    }
}

impl ErrorMetadata for StickerError {
    fn http_status_code(&self) -> u16 {
        sticker_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        sticker_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        sticker_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        sticker_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        sticker_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            StickerError::MissingInput => "No file uploaded and no url given".to_string(),
            StickerError::InvalidUrl(ref msg) => format!("Invalid url: {}", msg),
            StickerError::RemoteFetch { status_code } => {
                format!("Remote server responded with status {}", status_code)
            }
            StickerError::Fetch(_) => "Failed to fetch remote media".to_string(),
            StickerError::UnsupportedMedia { ref mime } => {
                format!("Unsupported media type: {}", mime)
            }
            StickerError::Encode(_) => "Failed to encode sticker image".to_string(),
            StickerError::Transcode { .. } => "Failed to convert video".to_string(),
            StickerError::Io(_) => "Internal server error".to_string(),
            StickerError::Cancelled => "Request cancelled".to_string(),
            StickerError::Internal(_) => "Internal server error".to_string(),
        }
    }
}
