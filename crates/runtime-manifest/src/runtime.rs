//! Runtime types and runtime requests
//!
//! A [`RuntimeRequest`] describes the runtime a role wants; the manifest
//! index answers it with one of its declared packages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ManifestError;
use crate::package::RuntimePackage;

/// Category of deployable runtime package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Node,
    IisNode,
    Php,
    Cache,
    Java,
}

impl RuntimeType {
    /// Number of runtime types; sizes per-type tables.
    pub const COUNT: usize = 5;

    /// All runtime types in table order.
    pub const ALL: [RuntimeType; RuntimeType::COUNT] = [
        RuntimeType::Node,
        RuntimeType::IisNode,
        RuntimeType::Php,
        RuntimeType::Cache,
        RuntimeType::Java,
    ];

    /// Stable slot index of this runtime type.
    pub fn index(self) -> usize {
        match self {
            RuntimeType::Node => 0,
            RuntimeType::IisNode => 1,
            RuntimeType::Php => 2,
            RuntimeType::Cache => 3,
            RuntimeType::Java => 4,
        }
    }

    /// Name used in manifest `type` attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeType::Node => "node",
            RuntimeType::IisNode => "iisnode",
            RuntimeType::Php => "php",
            RuntimeType::Cache => "cache",
            RuntimeType::Java => "java",
        }
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeType {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RuntimeType::ALL
            .into_iter()
            .find(|rt| rt.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ManifestError::UnknownRuntime(s.to_string()))
    }
}

/// Runtime configuration requested by a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeRequest {
    pub runtime: RuntimeType,
    /// Requested version; `None` always resolves to the default package.
    pub version: Option<String>,
}

impl RuntimeRequest {
    pub fn new(runtime: RuntimeType) -> Self {
        RuntimeRequest {
            runtime,
            version: None,
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Whether `package` satisfies this request.
    pub fn matches(&self, package: &RuntimePackage) -> bool {
        if package.runtime != self.runtime {
            return false;
        }
        match &self.version {
            Some(version) => version.trim().eq_ignore_ascii_case(package.version.trim()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(runtime: RuntimeType, version: &str) -> RuntimePackage {
        RuntimePackage::new(runtime, version, false, "/pkg.exe", None)
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, rt) in RuntimeType::ALL.iter().enumerate() {
            assert_eq!(rt.index(), i);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Node".parse::<RuntimeType>().unwrap(), RuntimeType::Node);
        assert_eq!(" IISNODE ".parse::<RuntimeType>().unwrap(), RuntimeType::IisNode);
        assert!("ruby".parse::<RuntimeType>().is_err());
    }

    #[test]
    fn test_request_matches_version_exactly() {
        let request = RuntimeRequest::new(RuntimeType::Node).with_version("0.12");
        assert!(request.matches(&package(RuntimeType::Node, "0.12")));
        assert!(request.matches(&package(RuntimeType::Node, " 0.12 ")));
        assert!(!request.matches(&package(RuntimeType::Node, "0.12.7")));
        assert!(!request.matches(&package(RuntimeType::Php, "0.12")));
    }

    #[test]
    fn test_request_without_version_never_matches() {
        let request = RuntimeRequest::new(RuntimeType::Node);
        assert!(!request.matches(&package(RuntimeType::Node, "0.12")));
    }
}
