//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p stikerin-api --test sticker_test`.
//! The transcoder is stubbed, so no ffmpeg binary is needed.

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stikerin_api::setup::routes;
use stikerin_api::state::AppState;
use stikerin_core::{Config, StickerError};
use stikerin_processing::{FilterSpec, Transcoder};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Writes a fixed animated WebP stand-in to the requested output path
#[derive(Default)]
pub struct StubTranscoder {
    calls: AtomicUsize,
}

impl StubTranscoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcoder for StubTranscoder {
    async fn transcode(
        &self,
        _input: Bytes,
        _spec: &FilterSpec,
        output: &Path,
        _cancel: &CancellationToken,
    ) -> Result<(), StickerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::fs::write(output, fixtures::ANIMATED_WEBP).await?;
        Ok(())
    }
}

/// Test application: server plus owned scratch directory.
pub struct TestApp {
    pub server: TestServer,
    pub transcoder: Arc<StubTranscoder>,
    pub scratch_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn scratch_is_empty(&self) -> bool {
        std::fs::read_dir(self.scratch_dir.path().join("tmp"))
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(true)
    }
}

pub fn setup_test_app() -> TestApp {
    let scratch_dir = TempDir::new().expect("Failed to create scratch dir");

    let mut config = Config::from_lookup(|_| None).expect("Failed to build config");
    config.sticker.scratch_dir = scratch_dir.path().join("tmp");
    config.server.max_upload_size_bytes = 2 * 1024 * 1024;

    let transcoder = Arc::new(StubTranscoder::default());
    let state = Arc::new(
        AppState::with_transcoder(config, transcoder.clone()).expect("Failed to build state"),
    );

    let app = routes::build_router(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        transcoder,
        scratch_dir,
    }
}
