//! Transcoder capability and its ffmpeg implementation.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use stikerin_core::{StickerConfig, StickerError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Geometry and timing of an animated sticker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub max_dimension: u32,
    pub frame_rate: u32,
    pub reserve_transparent: bool,
}

impl FilterSpec {
    pub fn from_config(config: &StickerConfig) -> Self {
        Self {
            max_dimension: config.motion_max_dimension,
            frame_rate: config.motion_frame_rate,
            reserve_transparent: config.reserve_transparent,
        }
    }

    /// ffmpeg `-vf` graph: fit, cap frame rate, pad to a transparent square,
    /// then quantize through a generated palette.
    pub fn filter_graph(&self) -> String {
        let size = self.max_dimension;
        let reserve = if self.reserve_transparent { "on" } else { "off" };

        format!(
            "scale='min({size},iw)':'min({size},ih)':force_original_aspect_ratio=decrease,\
             fps={fps},\
             pad={size}:{size}:-1:-1:color=white@0.0,\
             split[a][b];\
             [a]palettegen=reserve_transparent={reserve}:transparency_color=ffffff[p];\
             [b][p]paletteuse",
            size = size,
            fps = self.frame_rate,
            reserve = reserve,
        )
    }
}

/// Something that can turn a video buffer into an animated WebP file.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Write the animated sticker for `input` to `output`.
    ///
    /// Must stop and return `StickerError::Cancelled` once `cancel` fires.
    async fn transcode(
        &self,
        input: Bytes,
        spec: &FilterSpec,
        output: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), StickerError>;
}

/// Transcoder backed by an external ffmpeg binary
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Result<Self, StickerError> {
        let ffmpeg_path = ffmpeg_path.into();

        let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
        if ffmpeg_path
            .to_string_lossy()
            .chars()
            .any(|c| dangerous_chars.contains(&c))
        {
            return Err(StickerError::Internal(
                "Invalid ffmpeg_path: contains dangerous characters".to_string(),
            ));
        }

        Ok(Self { ffmpeg_path })
    }

    fn build_args(spec: &FilterSpec, output: &Path) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            "pipe:0".to_string(),
            "-c:v".to_string(),
            "libwebp".to_string(),
            "-vf".to_string(),
            spec.filter_graph(),
            "-an".to_string(),
            "-y".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    #[tracing::instrument(skip(self, input, spec, cancel), fields(input_len = input.len()))]
    async fn transcode(
        &self,
        input: Bytes,
        spec: &FilterSpec,
        output: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), StickerError> {
        if cancel.is_cancelled() {
            return Err(StickerError::Cancelled);
        }

        let args = Self::build_args(spec, output);
        tracing::debug!(ffmpeg = %self.ffmpeg_path.display(), ?args, "Spawning ffmpeg");

        let mut child = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                StickerError::transcode(format!(
                    "Failed to execute ffmpeg at {}: {}",
                    self.ffmpeg_path.display(),
                    e
                ))
            })?;

        // Feed stdin from its own task so a full stderr pipe cannot stall the write
        let writer = child.stdin.take().map(|mut stdin| {
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(&input).await {
                    // ffmpeg may stop reading early; its exit status decides the outcome
                    tracing::debug!(error = %e, "ffmpeg closed stdin before all input was written");
                }
                drop(stdin);
            })
        });

        let stderr_reader = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf).await;
                String::from_utf8_lossy(&buf).into_owned()
            })
        });

        let exited = tokio::select! {
            status = child.wait() => Some(status?),
            _ = cancel.cancelled() => None,
        };

        let Some(status) = exited else {
            tracing::debug!("Cancellation requested, killing ffmpeg");
            let _ = child.kill().await;
            if let Some(writer) = writer {
                writer.abort();
            }
            return Err(StickerError::Cancelled);
        };

        if let Some(writer) = writer {
            let _ = writer.await;
        }
        let stderr = match stderr_reader {
            Some(reader) => reader.await.unwrap_or_default(),
            None => String::new(),
        };

        if !status.success() {
            tracing::warn!(exit_code = ?status.code(), "ffmpeg exited with failure");
            return Err(StickerError::Transcode {
                message: "FFmpeg failed".to_string(),
                stderr: Some(stderr),
                exit_code: status.code(),
            });
        }

        Ok(())
    }
}
