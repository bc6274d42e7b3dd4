//! Raster transformer
//!
//! Turns a still image into a square, transparently padded WebP sticker.
//! The canvas edge is the longest side of the source, so the image keeps its
//! own resolution and only gains padding on the short axis.

use crate::compression::{WebpEncoder, WEBP_MAX_DIMENSION};
use crate::image::resize::ContainCanvas;
use bytes::Bytes;
use image::{DynamicImage, GenericImageView};
use std::io::Cursor;
use stikerin_core::{StickerConfig, StickerError};

/// Still-image sticker transform
#[derive(Debug, Clone, Copy)]
pub struct RasterTransform {
    encoder: WebpEncoder,
}

impl RasterTransform {
    pub fn new(quality: f32) -> Self {
        Self {
            encoder: WebpEncoder::new(quality),
        }
    }

    pub fn from_config(config: &StickerConfig) -> Self {
        Self::new(config.raster_quality)
    }

    /// Decode, contain in a square canvas, and encode as lossy WebP.
    ///
    /// CPU bound; callers on the async runtime should run it through
    /// `spawn_blocking`.
    pub fn transform(&self, data: &[u8]) -> Result<Bytes, StickerError> {
        let img = decode(data)?;
        let (width, height) = img.dimensions();

        // Reject before the canvas is allocated
        let size = width.max(height);
        if size == 0 || size > WEBP_MAX_DIMENSION {
            return Err(StickerError::Encode(format!(
                "{}x{} image needs a {}px canvas, WebP allows at most {}px",
                width, height, size, WEBP_MAX_DIMENSION
            )));
        }

        let canvas = ContainCanvas::square_for(width, height).apply(&img);
        self.encoder.encode(&DynamicImage::ImageRgba8(canvas))
    }
}

fn decode(data: &[u8]) -> Result<DynamicImage, StickerError> {
    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| StickerError::Encode(format!("Failed to read image: {}", e)))?
        .decode()
        .map_err(|e| StickerError::Encode(format!("Failed to decode image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sniffer::classify;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32, pixel: Rgba<u8>) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, pixel));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn decode_webp(data: &[u8]) -> DynamicImage {
        image::load_from_memory_with_format(data, ImageFormat::WebP).unwrap()
    }

    #[test]
    fn test_landscape_becomes_square() {
        let input = png_bytes(300, 100, Rgba([255, 0, 0, 255]));
        let output = RasterTransform::new(70.0).transform(&input).unwrap();

        let decoded = decode_webp(&output);
        assert_eq!(decoded.dimensions(), (300, 300));
    }

    #[test]
    fn test_padding_is_transparent_and_content_centered() {
        let input = png_bytes(200, 100, Rgba([0, 0, 255, 255]));
        let output = RasterTransform::new(70.0).transform(&input).unwrap();

        let decoded = decode_webp(&output).to_rgba8();
        assert_eq!(decoded.dimensions(), (200, 200));
        assert_eq!(decoded.get_pixel(100, 5)[3], 0);
        assert_eq!(decoded.get_pixel(100, 195)[3], 0);
        assert!(decoded.get_pixel(100, 100)[3] > 200);
    }

    #[test]
    fn test_square_input_keeps_dimensions() {
        let input = png_bytes(64, 64, Rgba([10, 200, 10, 255]));
        let output = RasterTransform::new(70.0).transform(&input).unwrap();
        assert_eq!(decode_webp(&output).dimensions(), (64, 64));
    }

    #[test]
    fn test_output_is_classified_as_webp_and_reprocessable() {
        let input = png_bytes(40, 20, Rgba([0, 0, 0, 255]));
        let transform = RasterTransform::new(70.0);

        let first = transform.transform(&input).unwrap();
        assert_eq!(classify(&first).mime, "image/webp");

        let second = transform.transform(&first).unwrap();
        assert_eq!(decode_webp(&second).dimensions(), (40, 40));
    }

    #[test]
    fn test_corrupt_image_is_encode_error() {
        let mut input = png_bytes(8, 8, Rgba([0, 0, 0, 255]));
        input.truncate(24);

        let result = RasterTransform::new(70.0).transform(&input);
        assert!(matches!(result, Err(StickerError::Encode(_))));
    }

    #[test]
    fn test_strip_wider_than_webp_limit_is_encode_error() {
        // Small file, but the square canvas would be 16384x16384
        let input = png_bytes(1, WEBP_MAX_DIMENSION + 1, Rgba([0, 0, 0, 255]));

        let result = RasterTransform::new(70.0).transform(&input);
        match result {
            Err(StickerError::Encode(msg)) => assert!(msg.contains("16384")),
            other => panic!("expected Encode, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_strip_at_webp_limit_is_accepted() {
        let input = png_bytes(WEBP_MAX_DIMENSION, 1, Rgba([0, 0, 0, 255]));
        let transform = RasterTransform::new(70.0);
        assert!(transform.transform(&input).is_ok());
    }

    #[test]
    fn test_undecodable_image_container_is_encode_error() {
        // Sniffed as image/heic, but no HEIF decoder is compiled in
        let mut input = vec![0x00, 0x00, 0x00, 0x18];
        input.extend_from_slice(b"ftypheic");
        input.extend_from_slice(&[0u8; 32]);
        assert_eq!(classify(&input).mime, "image/heic");

        let result = RasterTransform::new(70.0).transform(&input);
        assert!(matches!(result, Err(StickerError::Encode(_))));
    }

    #[test]
    fn test_from_config_uses_configured_quality() {
        let config = StickerConfig::default();
        let transform = RasterTransform::from_config(&config);
        assert_eq!(transform.encoder.quality(), 70.0);
    }
}
