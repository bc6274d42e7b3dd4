//! Video processing module

pub mod service;
pub mod temp;
pub mod transformer;

pub use service::{FfmpegTranscoder, FilterSpec, Transcoder};
pub use temp::TempArtifact;
pub use transformer::MotionTransform;
