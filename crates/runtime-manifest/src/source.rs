//! Manifest sources, fetchers and the scoped manifest stream.
//!
//! A manifest comes from a local file, the well-known network address, or
//! an in-memory string. Whatever the origin, it is read through a
//! [`ManifestStream`] that releases its reader exactly once.

use async_trait::async_trait;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ManifestConfig;
use crate::error::ManifestError;
use crate::Result;

/// Fetches a manifest document from a network address.
#[async_trait]
pub trait ManifestFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// reqwest-backed fetcher for published manifests
pub struct HttpManifestFetcher {
    http_client: reqwest::Client,
}

impl HttpManifestFetcher {
    pub fn new(config: &ManifestConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(HttpManifestFetcher { http_client })
    }

    /// Create fetcher from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&ManifestConfig::from_env())
    }
}

#[async_trait]
impl ManifestFetcher for HttpManifestFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        info!("Fetching runtime manifest from {}", url);
        let response = self.http_client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Fetched runtime manifest");
        Ok(body.to_vec())
    }
}

/// Where a manifest document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    Remote(String),
    File(PathBuf),
    Inline(String),
}

impl ManifestSource {
    /// A supplied path wins; otherwise the configured well-known address.
    pub fn select(manifest_path: Option<&Path>, config: &ManifestConfig) -> Self {
        match manifest_path {
            Some(path) => ManifestSource::File(path.to_path_buf()),
            None => ManifestSource::Remote(config.manifest_url.clone()),
        }
    }

    /// Human-readable origin for logs and errors.
    pub fn origin(&self) -> String {
        match self {
            ManifestSource::Remote(url) => url.clone(),
            ManifestSource::File(path) => path.display().to_string(),
            ManifestSource::Inline(_) => "<inline>".to_string(),
        }
    }

    pub async fn open(&self, fetcher: &dyn ManifestFetcher) -> Result<ManifestStream> {
        let reader: Box<dyn Read + Send> = match self {
            ManifestSource::Remote(url) => Box::new(Cursor::new(fetcher.fetch(url).await?)),
            ManifestSource::File(path) => Box::new(std::fs::File::open(path)?),
            ManifestSource::Inline(text) => Box::new(Cursor::new(text.clone().into_bytes())),
        };
        Ok(ManifestStream::new(self.origin(), reader))
    }
}

/// Reader over one manifest document, released at most once.
pub struct ManifestStream {
    origin: String,
    reader: Option<Box<dyn Read + Send>>,
}

impl ManifestStream {
    pub fn new(origin: String, reader: Box<dyn Read + Send>) -> Self {
        ManifestStream {
            origin,
            reader: Some(reader),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Read the remaining document as raw bytes.
    pub fn read_document(&mut self) -> Result<Vec<u8>> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| ManifestError::StreamReleased(self.origin.clone()))?;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Drop the underlying reader. Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        match self.reader.take() {
            Some(reader) => {
                drop(reader);
                debug!(origin = %self.origin, "Released manifest stream");
                true
            }
            None => false,
        }
    }

    pub fn is_released(&self) -> bool {
        self.reader.is_none()
    }
}

impl Drop for ManifestStream {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ManifestStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestStream")
            .field("origin", &self.origin)
            .field("released", &self.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::StaticManifestFetcher;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_select_prefers_path() {
        let config = ManifestConfig::new("https://manifests.example.com/rt.xml");
        let path = PathBuf::from("/tmp/rt.xml");

        assert_eq!(
            ManifestSource::select(Some(path.as_path()), &config),
            ManifestSource::File(path.clone())
        );
        assert_eq!(
            ManifestSource::select(None, &config),
            ManifestSource::Remote("https://manifests.example.com/rt.xml".to_string())
        );
    }

    #[test]
    fn test_release_twice_is_noop() {
        let mut stream = ManifestStream::new(
            "<inline>".to_string(),
            Box::new(Cursor::new(b"<x/>".to_vec())),
        );
        assert!(!stream.is_released());
        assert!(stream.release());
        assert!(stream.is_released());
        assert!(!stream.release());
        assert!(stream.is_released());
    }

    /// Reader that counts how many times it is dropped.
    struct CountingReader {
        inner: Cursor<Vec<u8>>,
        drops: Arc<AtomicUsize>,
    }

    impl Read for CountingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for CountingReader {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_reader_closed_once_across_release_and_drop() {
        let drops = Arc::new(AtomicUsize::new(0));
        let reader = CountingReader {
            inner: Cursor::new(b"<runtimemanifest/>".to_vec()),
            drops: Arc::clone(&drops),
        };
        let mut stream = ManifestStream::new("<inline>".to_string(), Box::new(reader));

        assert_eq!(stream.read_document().unwrap(), b"<runtimemanifest/>".to_vec());
        assert_eq!(drops.load(Ordering::SeqCst), 0);

        assert!(stream.release());
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert!(!stream.release());
        drop(stream);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unreleased_stream_closes_reader_on_drop() {
        let drops = Arc::new(AtomicUsize::new(0));
        let reader = CountingReader {
            inner: Cursor::new(Vec::new()),
            drops: Arc::clone(&drops),
        };
        drop(ManifestStream::new("<inline>".to_string(), Box::new(reader)));
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_read_after_release_fails() {
        let mut stream =
            ManifestStream::new("<inline>".to_string(), Box::new(Cursor::new(Vec::new())));
        stream.release();
        let err = stream.read_document().unwrap_err();
        assert!(matches!(err, ManifestError::StreamReleased(_)));
    }

    #[tokio::test]
    async fn test_open_file_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("runtimemanifest.xml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"<runtimemanifest/>").unwrap();

        let source = ManifestSource::File(path);
        let mut stream = source
            .open(&StaticManifestFetcher::new())
            .await
            .unwrap();
        assert_eq!(stream.read_document().unwrap(), b"<runtimemanifest/>");
    }

    #[tokio::test]
    async fn test_open_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let source = ManifestSource::File(dir.path().join("absent.xml"));
        let err = source
            .open(&StaticManifestFetcher::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }

    #[tokio::test]
    async fn test_open_remote_uses_fetcher() {
        let fetcher =
            StaticManifestFetcher::new().with_document("https://m.example/rt.xml", "<a/>");
        let source = ManifestSource::Remote("https://m.example/rt.xml".to_string());
        let mut stream = source.open(&fetcher).await.unwrap();
        assert_eq!(stream.origin(), "https://m.example/rt.xml");
        assert_eq!(stream.read_document().unwrap(), b"<a/>");
        assert_eq!(fetcher.fetch_count(), 1);
    }
}
