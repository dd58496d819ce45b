//! Per-row orchestration: parse one raw row, transform each referenced
//! image in order, assemble one output row.
//!
//! A row is all-or-nothing. The first transform failure aborts the row;
//! artifacts already written for earlier URLs stay on disk but are never
//! referenced by any output.

use imgbatch_core::row::{parse_row, OutputRow};

use crate::error::PipelineError;
use crate::transform::ImageTransformer;

/// Process one raw input row into an output row.
///
/// Images are transformed sequentially, in source order; artifact
/// locations end up positionally aligned with their source URLs.
pub async fn process_row(
    transformer: &ImageTransformer,
    raw: &str,
) -> Result<OutputRow, PipelineError> {
    let input = parse_row(raw)?;

    let mut artifact_paths = Vec::with_capacity(input.image_urls.len());
    for url in &input.image_urls {
        let location = transformer.transform(url, &input.label).await?;
        artifact_paths.push(location);
    }

    Ok(OutputRow {
        serial: input.serial,
        label: input.label,
        source_urls: input.image_urls,
        artifact_paths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::io;
    use std::sync::{Arc, Mutex};

    use crate::error::FetchError;
    use crate::fetch::ImageFetcher;
    use crate::sink::ArtifactSink;

    /// Fetcher that fails for URLs containing "bad" and counts calls.
    struct SelectiveFetcher {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ImageFetcher for SelectiveFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            if url.contains("bad") {
                return Err(FetchError::HttpStatus(404));
            }
            let img = image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
            let mut out = Vec::new();
            img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
                .unwrap();
            Ok(out)
        }
    }

    #[derive(Default)]
    struct MemorySink;

    #[async_trait]
    impl ArtifactSink for MemorySink {
        async fn write(&self, name: &str, _bytes: &[u8]) -> Result<String, io::Error> {
            Ok(format!("mem/{name}"))
        }
    }

    fn transformer() -> (ImageTransformer, Arc<SelectiveFetcher>) {
        let fetcher = Arc::new(SelectiveFetcher {
            calls: Mutex::new(Vec::new()),
        });
        let t = ImageTransformer::new(
            Arc::clone(&fetcher) as _,
            Arc::new(MemorySink),
        );
        (t, fetcher)
    }

    #[tokio::test]
    async fn output_is_positionally_aligned() {
        let (t, _) = transformer();
        let row = process_row(&t, "S1,Widget,http://a/1.png,http://a/2.png")
            .await
            .unwrap();

        assert_eq!(row.serial, "S1");
        assert_eq!(row.label, "Widget");
        assert_eq!(row.source_urls, vec!["http://a/1.png", "http://a/2.png"]);
        assert_eq!(row.artifact_paths.len(), 2);
        for path in &row.artifact_paths {
            assert!(path.starts_with("mem/Widget_"));
        }
    }

    #[tokio::test]
    async fn first_failure_aborts_the_row() {
        let (t, fetcher) = transformer();
        let err = process_row(&t, "S1,Widget,http://a/1.png,http://bad/2.png,http://a/3.png")
            .await
            .unwrap_err();

        assert_matches!(err, PipelineError::Fetch { .. });
        // The third URL was never attempted.
        assert_eq!(
            *fetcher.calls.lock().unwrap(),
            vec!["http://a/1.png", "http://bad/2.png"]
        );
    }

    #[tokio::test]
    async fn malformed_row_is_a_row_error() {
        let (t, fetcher) = transformer();
        let err = process_row(&t, "S1,Widget").await.unwrap_err();

        assert_matches!(err, PipelineError::Row(_));
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }
}
