//! Source acquisition: turn a `MediaSource` into raw bytes.

use bytes::Bytes;
use reqwest::StatusCode;
use std::time::Duration;
use stikerin_core::{MediaSource, StickerError};

/// Resolves request input to an in-memory buffer
#[derive(Debug, Clone)]
pub struct SourceAcquirer {
    client: reqwest::Client,
}

impl SourceAcquirer {
    pub fn new(timeout: Duration) -> Result<Self, StickerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StickerError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub async fn acquire(&self, source: MediaSource) -> Result<Bytes, StickerError> {
        match source {
            MediaSource::Bytes(data) => Ok(data),
            MediaSource::Url(url) => self.fetch(&url).await,
        }
    }

    /// Download the full body of `url`. Anything but a 200 is a failure.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Bytes, StickerError> {
        let parsed_url = reqwest::Url::parse(url)
            .map_err(|_| StickerError::InvalidUrl(format!("Invalid URL format: {}", url)))?;

        // Only allow HTTP/HTTPS
        if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
            return Err(StickerError::InvalidUrl(
                "Only HTTP and HTTPS URLs are allowed".to_string(),
            ));
        }

        tracing::debug!(url = %parsed_url, "Downloading media from URL");

        let response = self.client.get(parsed_url).send().await.map_err(|e| {
            tracing::warn!(error = %e, url = %url, "Failed to download from URL");
            StickerError::Fetch(e.to_string())
        })?;

        if response.status() != StatusCode::OK {
            return Err(StickerError::RemoteFetch {
                status_code: response.status().as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| StickerError::Fetch(format!("Failed to read response body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn acquirer() -> SourceAcquirer {
        SourceAcquirer::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_bytes_pass_through() {
        let data = acquirer()
            .acquire(MediaSource::Bytes(Bytes::from_static(b"\x89PNG")))
            .await
            .unwrap();
        assert_eq!(&data[..], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cat.gif"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"GIF89a....".to_vec()))
            .mount(&server)
            .await;

        let url = format!("{}/cat.gif", server.uri());
        let data = acquirer().acquire(MediaSource::Url(url)).await.unwrap();
        assert_eq!(&data[..], b"GIF89a....");
    }

    #[tokio::test]
    async fn test_non_ok_status_carries_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing.png", server.uri());
        let result = acquirer().acquire(MediaSource::Url(url)).await;
        assert!(matches!(
            result,
            Err(StickerError::RemoteFetch { status_code: 404 })
        ));
    }

    #[tokio::test]
    async fn test_other_success_codes_are_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = acquirer().fetch(&server.uri()).await;
        assert!(matches!(
            result,
            Err(StickerError::RemoteFetch { status_code: 204 })
        ));
    }

    #[tokio::test]
    async fn test_invalid_urls() {
        let result = acquirer().fetch("not a url").await;
        assert!(matches!(result, Err(StickerError::InvalidUrl(_))));

        let result = acquirer().fetch("ftp://example.com/cat.png").await;
        assert!(matches!(result, Err(StickerError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        // Port 9 (discard) on localhost is not expected to accept connections
        let result = acquirer().fetch("http://127.0.0.1:9/cat.png").await;
        assert!(matches!(result, Err(StickerError::Fetch(_))));
    }
}
