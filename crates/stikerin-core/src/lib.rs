//! Stikerin Core Library
//!
//! This crate provides the configuration, error taxonomy and shared models
//! used by the sticker processing pipeline and its HTTP boundary.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, ServerConfig, StickerConfig};
pub use error::{ErrorMetadata, LogLevel, StickerError};
pub use models::{Classification, MediaBuffer, MediaKind, MediaSource, StickerResult};
