//! Runtime packages declared by `<runtime>` manifest nodes.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ManifestError;
use crate::runtime::RuntimeType;
use crate::Result;

/// One installable runtime package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimePackage {
    pub runtime: RuntimeType,
    pub version: String,
    /// Fallback package for its runtime type
    pub is_default: bool,
    /// Path as written in the manifest
    pub file_path: String,
    /// Download location resolved against the region's blob container
    pub package_uri: String,
}

impl RuntimePackage {
    pub fn new(
        runtime: RuntimeType,
        version: &str,
        is_default: bool,
        file_path: &str,
        base_uri: Option<&str>,
    ) -> Self {
        RuntimePackage {
            runtime,
            version: version.to_string(),
            is_default,
            file_path: file_path.to_string(),
            package_uri: join_uri(base_uri, file_path),
        }
    }

    /// Build a package from a `<runtime>` node.
    ///
    /// Returns `Ok(None)` for runtime types this crate does not know, so a
    /// newer manifest still loads.
    pub(crate) fn from_node(
        node: roxmltree::Node<'_, '_>,
        base_uri: Option<&str>,
    ) -> Result<Option<Self>> {
        let type_name = required_attribute(node, "type")?;
        let runtime = match type_name.parse::<RuntimeType>() {
            Ok(rt) => rt,
            Err(_) => {
                warn!(runtime = %type_name, "Skipping manifest entry for unknown runtime type");
                return Ok(None);
            }
        };
        let version = required_attribute(node, "version")?;
        let file_path = required_attribute(node, "filepath")?;
        let is_default = node
            .attribute("default")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Some(RuntimePackage::new(
            runtime, version, is_default, file_path, base_uri,
        )))
    }
}

fn required_attribute<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Result<&'a str> {
    match node.attribute(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim()),
        _ => Err(ManifestError::missing_attribute(
            node.tag_name().name(),
            name,
        )),
    }
}

fn join_uri(base_uri: Option<&str>, file_path: &str) -> String {
    if file_path.starts_with("http://") || file_path.starts_with("https://") {
        return file_path.to_string();
    }
    match base_uri {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            file_path.trim_start_matches('/')
        ),
        None => file_path.to_string(),
    }
}
