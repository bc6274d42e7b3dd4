//! Test fixtures: in-memory images and container headers.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Minimal animated WebP header, enough to be sniffed as `image/webp`
pub const ANIMATED_WEBP: &[u8] =
    b"RIFF\x1a\x00\x00\x00WEBPVP8X\x0a\x00\x00\x00\x02\x00\x00\x00\x3f\x01\x00\x3f\x01\x00";

/// Opaque PNG of the given size
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([220, 40, 40, 255]),
    ));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer
}

/// ISO-BMFF header with an `isom` brand, classified as `video/mp4`
pub fn create_mp4_header() -> Vec<u8> {
    let mut data = vec![0x00, 0x00, 0x00, 0x18];
    data.extend_from_slice(b"ftypisom");
    data.extend_from_slice(&[0x00, 0x00, 0x02, 0x00]);
    data.extend_from_slice(b"isomiso2mp41");
    data.extend_from_slice(&[0u8; 64]);
    data
}
