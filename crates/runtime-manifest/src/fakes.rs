//! In-memory fakes for manifest fetching (testing only)

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::ManifestError;
use crate::source::ManifestFetcher;
use crate::Result;

/// Serves canned manifest documents keyed by URL.
#[derive(Debug, Default)]
pub struct StaticManifestFetcher {
    documents: HashMap<String, Vec<u8>>,
    fetches: AtomicUsize,
}

impl StaticManifestFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, body: &str) -> Self {
        self.documents
            .insert(url.to_string(), body.as_bytes().to_vec());
        self
    }

    /// Number of fetch calls served so far, including misses.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ManifestFetcher for StaticManifestFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| ManifestError::Http(format!("404 Not Found: {}", url)))
    }
}
