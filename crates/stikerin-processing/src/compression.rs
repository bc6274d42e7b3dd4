use bytes::Bytes;
use image::{DynamicImage, GenericImageView};
use stikerin_core::StickerError;

/// Largest canvas edge the WebP bitstream can describe
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// Lossy WebP encoder with a fixed quality
#[derive(Debug, Clone, Copy)]
pub struct WebpEncoder {
    quality: f32,
}

impl WebpEncoder {
    pub fn new(quality: f32) -> Self {
        Self {
            quality: quality.clamp(0.0, 100.0),
        }
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Encode an image to lossy WebP, keeping its alpha channel
    pub fn encode(&self, img: &DynamicImage) -> Result<Bytes, StickerError> {
        let (width, height) = img.dimensions();

        if width == 0 || height == 0 {
            return Err(StickerError::Encode("image has no pixels".to_string()));
        }
        if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
            return Err(StickerError::Encode(format!(
                "{}x{} exceeds the WebP limit of {}px",
                width, height, WEBP_MAX_DIMENSION
            )));
        }

        // Convert to RGBA for WebP encoding
        let rgba_img = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
        let webp_data = encoder.encode(self.quality);

        if webp_data.is_empty() {
            return Err(StickerError::Encode("WebP encoder produced no data".to_string()));
        }

        Ok(Bytes::copy_from_slice(&webp_data))
    }
}
