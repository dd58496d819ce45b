//! Remote image retrieval.
//!
//! [`ImageFetcher`] is the fetch boundary the transform unit runs
//! against; [`HttpFetcher`] is the production implementation. Tests swap
//! in canned fetchers instead of a live HTTP server.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;

use crate::error::FetchError;

/// Connect timeout for image downloads. No total-request timeout is set;
/// large images may legitimately take a while to stream.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieval contract for source images.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the resource at `url` and return its raw bytes.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed fetcher used in production.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a pre-configured HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("reqwest client construction failed");
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        // Stream the body chunk-by-chunk rather than buffering through
        // `bytes()`, which would allocate the whole transfer twice.
        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk?);
        }

        Ok(body)
    }
}
