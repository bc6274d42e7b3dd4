use bytes::Bytes;

/// Content type of every sticker the pipeline produces
pub const STICKER_CONTENT_TYPE: &str = "image/webp";

/// Encoded sticker handed back to the caller
#[derive(Debug, Clone)]
pub struct StickerResult {
    pub data: Bytes,
    pub content_type: &'static str,
}

impl StickerResult {
    pub fn webp(data: Bytes) -> Self {
        Self {
            data,
            content_type: STICKER_CONTENT_TYPE,
        }
    }
}
