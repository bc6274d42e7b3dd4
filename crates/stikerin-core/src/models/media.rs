use bytes::Bytes;

use crate::error::StickerError;

pub const OCTET_STREAM_MIME: &str = "application/octet-stream";
pub const OCTET_STREAM_EXTENSION: &str = "bin";

/// Where the media for a request comes from.
#[derive(Debug, Clone)]
pub enum MediaSource {
    /// Bytes supplied directly by the caller (e.g. a multipart upload)
    Bytes(Bytes),
    /// Remote location to fetch the bytes from
    Url(String),
}

impl MediaSource {
    /// Build a source from the optional inputs of a request.
    ///
    /// An uploaded buffer wins over a url when both are present. Empty
    /// buffers and blank urls count as absent.
    pub fn from_parts(raw: Option<Bytes>, url: Option<String>) -> Result<Self, StickerError> {
        if let Some(raw) = raw.filter(|b| !b.is_empty()) {
            return Ok(MediaSource::Bytes(raw));
        }

        match url.map(|u| u.trim().to_string()) {
            Some(url) if !url.is_empty() => Ok(MediaSource::Url(url)),
            _ => Err(StickerError::MissingInput),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, MediaSource::Url(_))
    }
}

/// Broad media family used for dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Content type detected from a buffer's own bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub mime: String,
    pub extension: String,
}

impl Classification {
    pub fn new(mime: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            extension: extension.into(),
        }
    }

    /// Fallback for buffers without a recognized signature
    pub fn octet_stream() -> Self {
        Self::new(OCTET_STREAM_MIME, OCTET_STREAM_EXTENSION)
    }

    pub fn kind(&self) -> MediaKind {
        let top_level = self
            .mime
            .split('/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match top_level.as_str() {
            "image" => MediaKind::Image,
            "video" => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }
}

/// An acquired buffer together with its classification
#[derive(Debug, Clone)]
pub struct MediaBuffer {
    data: Bytes,
    classification: Classification,
}

impl MediaBuffer {
    pub fn new(data: Bytes, classification: Classification) -> Self {
        Self {
            data,
            classification,
        }
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn kind(&self) -> MediaKind {
        self.classification.kind()
    }

    pub fn into_data(self) -> Bytes {
        self.data
    }
}
