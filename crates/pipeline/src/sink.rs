//! Artifact persistence.
//!
//! [`ArtifactSink`] is the blob-sink boundary: write named bytes, get
//! back a stable location string. [`FsArtifactSink`] persists to a local
//! output directory; the returned location is the artifact's path,
//! suitable for echoing into the output table.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

/// Persistence contract for transformed images.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Persist `bytes` under `name` and return the artifact's location.
    ///
    /// Implementations must not leave a partial artifact behind on
    /// failure.
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<String, io::Error>;
}

/// Filesystem-backed artifact sink.
pub struct FsArtifactSink {
    root: PathBuf,
}

impl FsArtifactSink {
    /// Create the sink, making sure the output directory exists.
    pub async fn create(root: impl Into<PathBuf>) -> Result<Self, io::Error> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }
}

#[async_trait]
impl ArtifactSink for FsArtifactSink {
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<String, io::Error> {
        let dest = self.root.join(name);

        // Write to a temp name and rename, so an interrupted write never
        // leaves a half-written artifact at the final path.
        let mut tmp = dest.clone();
        tmp.set_extension("jpg.part");

        if let Err(e) = tokio::fs::write(&tmp, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        tokio::fs::rename(&tmp, &dest).await?;

        Ok(dest.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_makes_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("artifacts");
        let _sink = FsArtifactSink::create(&root).await.unwrap();
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn write_persists_bytes_and_returns_location() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsArtifactSink::create(dir.path()).await.unwrap();

        let location = sink.write("widget_1.jpg", b"jpeg bytes").await.unwrap();

        assert!(location.ends_with("widget_1.jpg"));
        let on_disk = tokio::fs::read(&location).await.unwrap();
        assert_eq!(on_disk, b"jpeg bytes");
    }

    #[tokio::test]
    async fn write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsArtifactSink::create(dir.path()).await.unwrap();

        sink.write("widget_1.jpg", b"jpeg bytes").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["widget_1.jpg"]);
    }
}
