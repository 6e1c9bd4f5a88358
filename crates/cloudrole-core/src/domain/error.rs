//! Domain-level error taxonomy for cloudrole.

use runtime_manifest::{Location, ManifestError};

/// cloudrole domain errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("runtime manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error(
        "runtime manifest from {origin} is unusable for {location}: \
         blob container found = {base_uri_found}, runtimes declared = {packages_retrieved}"
    )]
    ManifestLoadFailed {
        origin: String,
        location: Location,
        base_uri_found: bool,
        packages_retrieved: bool,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cloudrole domain operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use runtime_manifest::RuntimeType;

    #[test]
    fn test_manifest_error_wraps_source() {
        let err: CoreError = ManifestError::RuntimeNotDeclared(RuntimeType::Node).into();
        let msg = err.to_string();
        assert!(msg.contains("runtime manifest error"));
        assert!(msg.contains("node"));
    }

    #[test]
    fn test_load_failed_reports_flags() {
        let err = CoreError::ManifestLoadFailed {
            origin: "manifest.xml".to_string(),
            location: Location::EastAsia,
            base_uri_found: false,
            packages_retrieved: true,
        };
        let msg = err.to_string();
        assert!(msg.contains("manifest.xml"));
        assert!(msg.contains("East Asia"));
        assert!(msg.contains("blob container found = false"));
    }
}
