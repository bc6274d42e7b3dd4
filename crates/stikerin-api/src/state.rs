//! Application state shared by every handler.

use std::sync::Arc;
use stikerin_core::{Config, StickerError};
use stikerin_processing::{StickerPipeline, Transcoder};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: StickerPipeline,
}

impl AppState {
    /// State backed by the ffmpeg binary named in the configuration
    pub fn new(config: Config) -> Result<Self, StickerError> {
        let pipeline = StickerPipeline::new(&config.sticker)?;
        Ok(Self { config, pipeline })
    }

    pub fn with_transcoder(
        config: Config,
        transcoder: Arc<dyn Transcoder>,
    ) -> Result<Self, StickerError> {
        let pipeline = StickerPipeline::with_transcoder(&config.sticker, transcoder)?;
        Ok(Self { config, pipeline })
    }
}
