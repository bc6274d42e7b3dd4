//! Configuration module
//!
//! Process-wide, immutable configuration. The sticker output contract
//! (quality, canvas size, frame-rate cap) is fixed; only deployment concerns
//! such as the transcoder location, the scratch directory and the listening
//! port come from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// Output contract
const RASTER_QUALITY: f32 = 70.0;
const MOTION_MAX_DIMENSION: u32 = 320;
const MOTION_FRAME_RATE: u32 = 15;

// Deployment defaults
const FFMPEG_PATH: &str = "bin/ffmpeg";
const SCRATCH_DIR: &str = "tmp";
const FETCH_TIMEOUT_SECS: u64 = 60;
const SERVER_PORT: u16 = 8080;
const MAX_UPLOAD_SIZE_MB: usize = 50;

/// Sticker pipeline configuration, shared read-only by every request.
#[derive(Clone, Debug)]
pub struct StickerConfig {
    /// Lossy WebP quality for the raster path (0-100)
    pub raster_quality: f32,
    /// Edge length of the square animated canvas
    pub motion_max_dimension: u32,
    /// Upper bound on output frames per second
    pub motion_frame_rate: u32,
    /// Reserve one fully transparent palette entry during quantization
    pub reserve_transparent: bool,
    pub ffmpeg_path: PathBuf,
    pub scratch_dir: PathBuf,
    pub fetch_timeout: Duration,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            raster_quality: RASTER_QUALITY,
            motion_max_dimension: MOTION_MAX_DIMENSION,
            motion_frame_rate: MOTION_FRAME_RATE,
            reserve_transparent: true,
            ffmpeg_path: PathBuf::from(FFMPEG_PATH),
            scratch_dir: PathBuf::from(SCRATCH_DIR),
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }
}

/// HTTP boundary configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub max_upload_size_bytes: usize,
    pub environment: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub sticker: StickerConfig,
    pub server: ServerConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let max_upload_size_mb = lookup("MAX_UPLOAD_SIZE_MB")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let fetch_timeout_secs = lookup("FETCH_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(FETCH_TIMEOUT_SECS);

        let sticker = StickerConfig {
            ffmpeg_path: lookup("FFMPEG_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(FFMPEG_PATH)),
            scratch_dir: lookup("SCRATCH_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(SCRATCH_DIR)),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            ..StickerConfig::default()
        };

        let config = Config {
            sticker,
            server: ServerConfig {
                port,
                max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
                environment,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.sticker.fetch_timeout.is_zero() {
            return Err(anyhow::anyhow!(
                "FETCH_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if self.server.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_UPLOAD_SIZE_MB must be greater than zero"
            ));
        }

        if self.sticker.scratch_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("SCRATCH_DIR must not be empty"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.server.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.sticker.raster_quality, 70.0);
        assert_eq!(config.sticker.motion_max_dimension, 320);
        assert_eq!(config.sticker.motion_frame_rate, 15);
        assert!(config.sticker.reserve_transparent);
        assert_eq!(config.sticker.ffmpeg_path, PathBuf::from("bin/ffmpeg"));
        assert_eq!(config.sticker.scratch_dir, PathBuf::from("tmp"));
        assert_eq!(config.sticker.fetch_timeout, Duration::from_secs(60));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_upload_size_bytes, 50 * 1024 * 1024);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("FFMPEG_PATH", "/usr/bin/ffmpeg"),
            ("SCRATCH_DIR", "/var/tmp/stickers"),
            ("PORT", "3000"),
            ("FETCH_TIMEOUT_SECS", "5"),
            ("ENVIRONMENT", "Production"),
        ]))
        .unwrap();

        assert_eq!(config.sticker.ffmpeg_path, PathBuf::from("/usr/bin/ffmpeg"));
        assert_eq!(config.sticker.scratch_dir, PathBuf::from("/var/tmp/stickers"));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.sticker.fetch_timeout, Duration::from_secs(5));
        assert!(config.is_production());
    }

    #[test]
    fn test_output_contract_not_overridable() {
        // Quality and canvas size stay fixed whatever the environment says
        let config = Config::from_lookup(lookup_from(&[
            ("QUALITY", "10"),
            ("MOTION_MAX_DIMENSION", "512"),
        ]))
        .unwrap();

        assert_eq!(config.sticker.raster_quality, 70.0);
        assert_eq!(config.sticker.motion_max_dimension, 320);
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Config::from_lookup(lookup_from(&[("FETCH_TIMEOUT_SECS", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_ffmpeg_path_uses_default() {
        let config = Config::from_lookup(lookup_from(&[("FFMPEG_PATH", "  ")])).unwrap();
        assert_eq!(config.sticker.ffmpeg_path, PathBuf::from("bin/ffmpeg"));
    }
}
