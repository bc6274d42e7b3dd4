//! Stikerin Media Processing Library
//!
//! Turns an opaque image or video buffer into a square WebP sticker:
//! content sniffing, source acquisition, the raster and motion transforms,
//! and the pipeline that dispatches between them.

pub mod compression;
pub mod image;
pub mod pipeline;
pub mod sniffer;
pub mod source;
pub mod video;

// Re-export commonly used types
pub use compression::WebpEncoder;
pub use self::image::{ContainCanvas, RasterTransform};
pub use pipeline::StickerPipeline;
pub use sniffer::classify;
pub use source::SourceAcquirer;
pub use video::{FfmpegTranscoder, FilterSpec, MotionTransform, TempArtifact, Transcoder};
