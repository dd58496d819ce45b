//! Pipeline error taxonomy.

use imgbatch_core::CoreError;

/// Why a remote image fetch failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL was empty after trimming.
    #[error("empty image URL")]
    EmptyUrl,

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("remote returned HTTP {0}")]
    HttpStatus(u16),
}

/// Any failure while processing a row of a batch job.
///
/// The first three variants come out of the image transform unit; `Row`
/// wraps a malformed input row. The executor does not distinguish them --
/// any one of these fails the whole job -- but the variant and its source
/// chain end up in the job's `error_message`.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The remote image could not be retrieved.
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// The retrieved bytes are not a decodable image.
    #[error("undecodable image from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    /// The encoded artifact could not be persisted.
    #[error("artifact write failed for {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The input row itself is malformed.
    #[error(transparent)]
    Row(#[from] CoreError),
}
