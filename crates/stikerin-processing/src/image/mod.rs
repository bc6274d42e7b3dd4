//! Image processing module
//!
//! This module provides the raster sticker path:
//! - Containment resize onto a transparent square canvas (resize)
//! - Decode, pad and WebP re-encode (transformer)

pub mod resize;
pub mod transformer;

pub use resize::ContainCanvas;
pub use transformer::RasterTransform;
