//! Error types for runtime-manifest

use thiserror::Error;

use crate::runtime::RuntimeType;

/// Errors that can occur while loading or querying a runtime manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest content violates the publisher contract
    #[error("The runtime manifest is invalid: {0}")]
    InvalidManifest(String),

    /// Manifest is not well-formed XML
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error while fetching a remote manifest
    #[error("HTTP error: {0}")]
    Http(String),

    /// Requested runtime type has no entry in the manifest at all
    #[error("Runtime '{0}' is not declared in the runtime manifest")]
    RuntimeNotDeclared(RuntimeType),

    /// Runtime type is declared but nothing matched and no default exists
    #[error("Runtime '{0}' has no default package in the runtime manifest")]
    NoDefaultPackage(RuntimeType),

    /// Runtime name could not be parsed
    #[error("Unknown runtime type: {0}")]
    UnknownRuntime(String),

    /// Location name could not be parsed
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    /// Digest text is not 64 hex characters
    #[error("Invalid manifest digest: {0}")]
    InvalidDigest(String),

    /// Manifest stream was read after release
    #[error("Manifest stream for {0} has already been released")]
    StreamReleased(String),
}

impl From<reqwest::Error> for ManifestError {
    fn from(err: reqwest::Error) -> Self {
        ManifestError::Http(err.to_string())
    }
}

impl ManifestError {
    /// Templated invalid-manifest error for a node missing a required attribute.
    pub(crate) fn missing_attribute(node: &str, attribute: &str) -> Self {
        ManifestError::InvalidManifest(format!(
            "<{}> node is missing required attribute '{}'",
            node, attribute
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_message() {
        let err = ManifestError::missing_attribute("blobcontainer", "uri");
        let msg = err.to_string();
        assert!(msg.contains("runtime manifest is invalid"));
        assert!(msg.contains("blobcontainer"));
        assert!(msg.contains("'uri'"));
    }

    #[test]
    fn test_runtime_not_declared_names_runtime() {
        let err = ManifestError::RuntimeNotDeclared(RuntimeType::Php);
        assert!(err.to_string().contains("php"));
    }
}
