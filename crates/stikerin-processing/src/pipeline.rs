//! Sticker pipeline
//!
//! Acquire, classify, dispatch to the raster or motion transform, and tag the
//! result. Exactly one transform runs per request; anything that is neither an
//! image nor a video is rejected with `UnsupportedMedia`.

use crate::image::RasterTransform;
use crate::sniffer::classify;
use crate::source::SourceAcquirer;
use crate::video::{FfmpegTranscoder, MotionTransform, Transcoder};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Instant;
use stikerin_core::{MediaBuffer, MediaKind, MediaSource, StickerConfig, StickerError, StickerResult};
use tokio_util::sync::CancellationToken;

/// Shared, immutable request processor
#[derive(Debug, Clone)]
pub struct StickerPipeline {
    acquirer: SourceAcquirer,
    raster: RasterTransform,
    motion: MotionTransform,
}

impl StickerPipeline {
    /// Pipeline backed by the configured ffmpeg binary
    pub fn new(config: &StickerConfig) -> Result<Self, StickerError> {
        let transcoder = FfmpegTranscoder::new(config.ffmpeg_path.clone())?;
        Self::with_transcoder(config, Arc::new(transcoder))
    }

    pub fn with_transcoder(
        config: &StickerConfig,
        transcoder: Arc<dyn Transcoder>,
    ) -> Result<Self, StickerError> {
        Ok(Self {
            acquirer: SourceAcquirer::new(config.fetch_timeout)?,
            raster: RasterTransform::from_config(config),
            motion: MotionTransform::from_config(transcoder, config),
        })
    }

    #[tracing::instrument(skip(self, source, cancel), fields(remote = source.is_remote()))]
    pub async fn process(
        &self,
        source: MediaSource,
        cancel: &CancellationToken,
    ) -> Result<StickerResult, StickerError> {
        let started = Instant::now();
        let data = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(StickerError::Cancelled),
            data = self.acquirer.acquire(source) => data?,
        };

        let bytes = data.len();
        let buffer = classify_buffer(data);
        tracing::debug!(
            mime = %buffer.classification().mime,
            kind = %buffer.kind(),
            bytes,
            "Classified input"
        );

        let sticker = match buffer.kind() {
            MediaKind::Video => self.motion.transform(buffer.into_data(), cancel).await?,
            MediaKind::Image => self.rasterize(buffer.into_data()).await?,
            MediaKind::Other => {
                return Err(StickerError::UnsupportedMedia {
                    mime: buffer.classification().mime.clone(),
                })
            }
        };

        tracing::info!(
            bytes = sticker.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Sticker created"
        );
        Ok(StickerResult::webp(sticker))
    }

    async fn rasterize(&self, data: Bytes) -> Result<Bytes, StickerError> {
        let raster = self.raster;
        tokio::task::spawn_blocking(move || raster.transform(&data))
            .await
            .map_err(|e| StickerError::Internal(format!("Task join error: {}", e)))?
    }
}

/// Attach a content-based classification to a buffer
pub fn classify_buffer(data: Bytes) -> MediaBuffer {
    let classification = classify(&data);
    MediaBuffer::new(data, classification)
}
