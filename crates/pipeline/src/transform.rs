//! The image transform unit.
//!
//! One call = one remote image in, one persisted JPEG artifact out.
//! Stateless apart from the fetcher and sink handles; it knows nothing
//! about jobs or rows.

use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use uuid::Uuid;

use imgbatch_core::naming::artifact_filename;

use crate::error::{FetchError, PipelineError};
use crate::fetch::ImageFetcher;
use crate::sink::ArtifactSink;

/// JPEG quality for re-encoded artifacts. Deliberately low -- the output
/// is a size-reduced derivative, not a faithful copy.
pub const JPEG_QUALITY: u8 = 50;

/// Fetches one remote image and produces one re-encoded artifact.
pub struct ImageTransformer {
    fetcher: Arc<dyn ImageFetcher>,
    sink: Arc<dyn ArtifactSink>,
}

impl ImageTransformer {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, sink: Arc<dyn ArtifactSink>) -> Self {
        Self { fetcher, sink }
    }

    /// Transform the image at `url` into a persisted JPEG artifact named
    /// after `label`, returning the artifact's location.
    ///
    /// On failure nothing is persisted. No retries at this layer.
    pub async fn transform(&self, url: &str, label: &str) -> Result<String, PipelineError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(PipelineError::Fetch {
                url: String::new(),
                source: FetchError::EmptyUrl,
            });
        }

        let bytes = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|source| PipelineError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let encoded = reencode_jpeg(&bytes).map_err(|source| PipelineError::Decode {
            url: url.to_string(),
            source,
        })?;

        let name = artifact_filename(label, Uuid::new_v4());
        let location = self
            .sink
            .write(&name, &encoded)
            .await
            .map_err(|source| PipelineError::Write { name, source })?;

        tracing::debug!(url, location = %location, "Image transformed");
        Ok(location)
    }
}

/// Decode arbitrary image bytes, flatten to 3-channel RGB (drops alpha
/// and palette indirection), and re-encode as JPEG at [`JPEG_QUALITY`].
fn reencode_jpeg(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = decoded.to_rgb8();

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    encoder.encode_image(&rgb)?;
    Ok(out)
}
