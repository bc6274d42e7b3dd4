//! Scratch files for transcoder output.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use stikerin_core::StickerError;
use tempfile::TempPath;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Uniquely named output file owned by a single transform.
///
/// The file is removed when the artifact is dropped, so every early return
/// cleans up after itself. `read_and_remove` is the success path and reports
/// a failed delete instead of swallowing it.
#[derive(Debug)]
pub struct TempArtifact {
    path: TempPath,
}

impl TempArtifact {
    /// Create an empty `sticker-<pid>-<seq>-<random>.webp` in `scratch_dir`,
    /// creating the directory if needed.
    pub async fn allocate(scratch_dir: &Path) -> Result<Self, StickerError> {
        tokio::fs::create_dir_all(scratch_dir).await?;

        let prefix = format!(
            "sticker-{}-{}-",
            std::process::id(),
            SEQUENCE.fetch_add(1, Ordering::Relaxed)
        );
        let dir: PathBuf = scratch_dir.to_path_buf();

        let path = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(".webp")
                .tempfile_in(&dir)
                .map(|file| file.into_temp_path())
        })
        .await
        .map_err(|e| StickerError::Internal(format!("Task join error: {}", e)))??;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file, then delete it.
    pub async fn read_and_remove(self) -> Result<Vec<u8>, StickerError> {
        let data = tokio::fs::read(&self.path).await?;
        self.path.close()?;
        Ok(data)
    }
}
