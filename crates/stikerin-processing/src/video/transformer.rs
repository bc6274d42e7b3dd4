use crate::video::service::{FilterSpec, Transcoder};
use crate::video::temp::TempArtifact;
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use stikerin_core::{StickerConfig, StickerError};
use tokio_util::sync::CancellationToken;

/// Animated sticker transform for video input
#[derive(Clone)]
pub struct MotionTransform {
    transcoder: Arc<dyn Transcoder>,
    spec: FilterSpec,
    scratch_dir: PathBuf,
}

impl MotionTransform {
    pub fn new(transcoder: Arc<dyn Transcoder>, spec: FilterSpec, scratch_dir: PathBuf) -> Self {
        Self {
            transcoder,
            spec,
            scratch_dir,
        }
    }

    pub fn from_config(transcoder: Arc<dyn Transcoder>, config: &StickerConfig) -> Self {
        Self::new(
            transcoder,
            FilterSpec::from_config(config),
            config.scratch_dir.clone(),
        )
    }

    #[tracing::instrument(skip(self, buffer, cancel), fields(input_len = buffer.len()))]
    pub async fn transform(
        &self,
        buffer: Bytes,
        cancel: &CancellationToken,
    ) -> Result<Bytes, StickerError> {
        let artifact = TempArtifact::allocate(&self.scratch_dir).await?;
        tracing::debug!(output_path = %artifact.path().display(), "Transcoding to animated WebP");

        self.transcoder
            .transcode(buffer, &self.spec, artifact.path(), cancel)
            .await?;

        let data = artifact.read_and_remove().await?;
        if data.is_empty() {
            return Err(StickerError::transcode("Transcoder produced an empty file"));
        }

        Ok(Bytes::from(data))
    }
}

impl std::fmt::Debug for MotionTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionTransform")
            .field("spec", &self.spec)
            .field("scratch_dir", &self.scratch_dir)
            .finish_non_exhaustive()
    }
}
