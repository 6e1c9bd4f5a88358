//! Runtime manifest configuration

use serde::{Deserialize, Serialize};

/// Published location of the runtime manifest.
pub const DEFAULT_MANIFEST_URL: &str = "https://runtimes.cloudrole.dev/runtimemanifest.xml";

/// Default fetch timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to fetch the runtime manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Well-known manifest address used when no local file is given
    pub manifest_url: String,
    /// HTTP timeout for the manifest fetch
    pub timeout_secs: u64,
    /// User agent sent with the fetch
    pub user_agent: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            manifest_url: std::env::var("CLOUDROLE_MANIFEST_URL")
                .unwrap_or_else(|_| DEFAULT_MANIFEST_URL.to_string()),
            timeout_secs: std::env::var("CLOUDROLE_MANIFEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("cloudrole-runtime-manifest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ManifestConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create config for a specific manifest address
    pub fn new(manifest_url: &str) -> Self {
        ManifestConfig {
            manifest_url: manifest_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
