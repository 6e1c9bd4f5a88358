//! Runtime manifest index
//!
//! Loads the manifest once, resolves the blob container for the requested
//! location, partitions the declared packages by runtime type and answers
//! [`RuntimeRequest`]s against them. The index is read-only after load.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::ManifestError;
use crate::location::{Datacenter, Location};
use crate::package::RuntimePackage;
use crate::runtime::{RuntimeRequest, RuntimeType};
use crate::source::{ManifestFetcher, ManifestSource};
use crate::table::PackageTable;
use crate::Result;

/// SHA-256 of the raw manifest bytes an index was built from.
///
/// Deserialising goes through [`TryFrom<String>`], so a stored digest is
/// always 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ManifestDigest(String);

impl ManifestDigest {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        ManifestDigest(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form (first 12 hex chars).
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl TryFrom<String> for ManifestDigest {
    type Error = ManifestError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let well_formed = value.len() == 64 && value.bytes().all(|b| b.is_ascii_hexdigit());
        if !well_formed {
            return Err(ManifestError::InvalidDigest(value));
        }
        Ok(ManifestDigest(value.to_ascii_lowercase()))
    }
}

impl std::fmt::Display for ManifestDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Answer to a [`RuntimeRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeMatch<'a> {
    /// `true` for an explicit candidate match, `false` for the default fallback
    pub matched: bool,
    pub package: &'a RuntimePackage,
}

/// Outcome of loading a manifest.
///
/// The index is returned even when the load is not a success; callers
/// should not trust it unless [`ManifestLoad::is_success`] holds.
#[derive(Debug, Clone)]
pub struct ManifestLoad {
    pub index: RuntimeManifestIndex,
    /// A `blobcontainer` node exists for the requested location
    pub base_uri_found: bool,
    /// At least one `<runtime>` node was declared
    pub packages_retrieved: bool,
}

impl ManifestLoad {
    pub fn is_success(&self) -> bool {
        self.base_uri_found && self.packages_retrieved
    }

    /// Open `source`, read the document, release the stream, then index it.
    pub async fn build(
        location: Location,
        source: &ManifestSource,
        fetcher: &dyn ManifestFetcher,
    ) -> Result<ManifestLoad> {
        let bytes = {
            let mut stream = source.open(fetcher).await?;
            let bytes = stream.read_document();
            stream.release();
            bytes?
        };
        debug!(origin = %source.origin(), bytes = bytes.len(), "Read runtime manifest");
        RuntimeManifestIndex::from_bytes(location, &bytes)
    }
}

/// Runtime packages declared by a manifest, indexed by runtime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeManifestIndex {
    location: Location,
    base_uri: Option<String>,
    packages: PackageTable,
    digest: ManifestDigest,
}

impl RuntimeManifestIndex {
    /// Index an in-memory manifest document.
    pub fn from_document(location: Location, xml: &str) -> Result<ManifestLoad> {
        Self::from_bytes(location, xml.as_bytes())
    }

    pub fn from_bytes(location: Location, bytes: &[u8]) -> Result<ManifestLoad> {
        let digest = ManifestDigest::from_bytes(bytes);
        let text = std::str::from_utf8(bytes).map_err(|e| {
            ManifestError::InvalidManifest(format!("document is not valid UTF-8: {}", e))
        })?;
        let doc = roxmltree::Document::parse(text)?;

        let base_uri = find_base_uri(&doc, location.datacenter())?;
        let base_uri_found = base_uri.is_some();
        if !base_uri_found {
            warn!(
                location = %location,
                datacenter = %location.datacenter(),
                "Runtime manifest has no blob container for location"
            );
        }

        let nodes: Vec<_> = runtime_nodes(&doc).collect();
        let packages_retrieved = !nodes.is_empty();

        let mut packages = PackageTable::new();
        for node in nodes {
            if let Some(package) = RuntimePackage::from_node(node, base_uri.as_deref())? {
                debug!(
                    runtime = %package.runtime,
                    version = %package.version,
                    is_default = package.is_default,
                    "Indexed runtime package"
                );
                packages.add(package);
            }
        }

        info!(
            location = %location,
            digest = %digest.short(),
            packages = packages.len(),
            base_uri_found,
            packages_retrieved,
            "Loaded runtime manifest"
        );

        Ok(ManifestLoad {
            index: RuntimeManifestIndex {
                location,
                base_uri,
                packages,
                digest,
            },
            base_uri_found,
            packages_retrieved,
        })
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Blob container URI for the index's location, if the manifest has one.
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    pub fn digest(&self) -> &ManifestDigest {
        &self.digest
    }

    /// Runtime types declared by the manifest.
    pub fn runtimes(&self) -> impl Iterator<Item = RuntimeType> + '_ {
        self.packages.runtimes()
    }

    /// Non-default packages for `runtime`, in document order.
    pub fn candidates(&self, runtime: RuntimeType) -> &[RuntimePackage] {
        self.packages
            .get(runtime)
            .map(|slot| slot.candidates.as_slice())
            .unwrap_or(&[])
    }

    pub fn default_package(&self, runtime: RuntimeType) -> Option<&RuntimePackage> {
        self.packages
            .get(runtime)
            .and_then(|slot| slot.default.as_ref())
    }

    /// Find the package for `request`.
    ///
    /// The first candidate that matches wins; otherwise the runtime's default
    /// is returned with `matched == false`.
    pub fn find_match(&self, request: &RuntimeRequest) -> Result<RuntimeMatch<'_>> {
        let slot = self
            .packages
            .get(request.runtime)
            .ok_or(ManifestError::RuntimeNotDeclared(request.runtime))?;

        if let Some(package) = slot.candidates.iter().find(|p| request.matches(p)) {
            return Ok(RuntimeMatch {
                matched: true,
                package,
            });
        }

        slot.default
            .as_ref()
            .map(|package| RuntimeMatch {
                matched: false,
                package,
            })
            .ok_or(ManifestError::NoDefaultPackage(request.runtime))
    }
}

fn find_base_uri(doc: &roxmltree::Document<'_>, datacenter: Datacenter) -> Result<Option<String>> {
    let wanted = datacenter.as_str().to_ascii_uppercase();
    let container = doc.descendants().find(|n| {
        n.has_tag_name("blobcontainer")
            && n.attribute("datacenter")
                .map(|dc| dc.trim().to_ascii_uppercase() == wanted)
                .unwrap_or(false)
    });

    match container {
        None => Ok(None),
        Some(node) => match node.attribute("uri").map(str::trim) {
            Some(uri) if !uri.is_empty() => Ok(Some(uri.to_string())),
            _ => Err(ManifestError::missing_attribute("blobcontainer", "uri")),
        },
    }
}

fn runtime_nodes<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> {
    doc.descendants().filter(|n| {
        n.has_tag_name("runtime")
            && n.parent_element()
                .map(|p| p.has_tag_name("runtimes"))
                .unwrap_or(false)
    })
}
