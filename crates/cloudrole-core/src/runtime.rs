//! Runtime resolution against the published runtime manifest.
//!
//! Loads the manifest for a location, refuses to use it unless the load
//! succeeded, then resolves runtime requests into serialisable results.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Instrument;

use runtime_manifest::{
    Location, ManifestConfig, ManifestFetcher, ManifestLoad, ManifestSource,
    RuntimeManifestIndex, RuntimeRequest, RuntimeType,
};

use crate::domain::{CoreError, Result};
use crate::obs::{emit_manifest_loaded, emit_runtime_resolved, manifest_span};

/// Package chosen for a runtime request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRuntime {
    pub runtime: RuntimeType,
    pub requested_version: Option<String>,
    /// `false` when the runtime's default was used as a fallback
    pub matched: bool,
    pub version: String,
    pub package_uri: String,
    pub manifest_digest: String,
}

/// Versions the manifest offers for one runtime type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeListing {
    pub runtime: RuntimeType,
    pub default_version: Option<String>,
    pub versions: Vec<String>,
}

/// Load the manifest for `location`; a local `manifest_path` overrides the
/// configured address.
pub async fn load_manifest(
    location: Location,
    manifest_path: Option<&Path>,
    config: &ManifestConfig,
    fetcher: &dyn ManifestFetcher,
) -> Result<RuntimeManifestIndex> {
    let source = ManifestSource::select(manifest_path, config);
    let origin = source.origin();

    let load = ManifestLoad::build(location, &source, fetcher)
        .instrument(manifest_span(&origin, location))
        .await?;
    emit_manifest_loaded(&load);

    if !load.is_success() {
        return Err(CoreError::ManifestLoadFailed {
            origin,
            location,
            base_uri_found: load.base_uri_found,
            packages_retrieved: load.packages_retrieved,
        });
    }
    Ok(load.index)
}

/// Resolve `request` against an already loaded index.
pub fn resolve_in(index: &RuntimeManifestIndex, request: &RuntimeRequest) -> Result<ResolvedRuntime> {
    let found = index.find_match(request)?;
    emit_runtime_resolved(request, &found);

    Ok(ResolvedRuntime {
        runtime: request.runtime,
        requested_version: request.version.clone(),
        matched: found.matched,
        version: found.package.version.clone(),
        package_uri: found.package.package_uri.clone(),
        manifest_digest: index.digest().to_string(),
    })
}

/// Load the manifest and resolve one runtime request.
pub async fn resolve_runtime(
    location: Location,
    manifest_path: Option<&Path>,
    request: &RuntimeRequest,
    config: &ManifestConfig,
    fetcher: &dyn ManifestFetcher,
) -> Result<ResolvedRuntime> {
    let index = load_manifest(location, manifest_path, config, fetcher).await?;
    resolve_in(&index, request)
}

/// Every runtime the index declares, defaults and candidates listed apart.
pub fn runtime_catalog(index: &RuntimeManifestIndex) -> Vec<RuntimeListing> {
    index
        .runtimes()
        .map(|runtime| RuntimeListing {
            runtime,
            default_version: index.default_package(runtime).map(|p| p.version.clone()),
            versions: index
                .candidates(runtime)
                .iter()
                .map(|p| p.version.clone())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"<runtimemanifest>
        <baseuri><blobcontainer datacenter="US" uri="https://blob.example/us"/></baseuri>
        <runtimes>
            <runtime type="node" version="0.10" default="true" filepath="/node/0.10.exe"/>
            <runtime type="node" version="0.12" filepath="/node/0.12.exe"/>
            <runtime type="cache" version="1.8" filepath="/cache/1.8.exe"/>
        </runtimes>
    </runtimemanifest>"#;

    fn index() -> RuntimeManifestIndex {
        RuntimeManifestIndex::from_document(Location::EastUs, MANIFEST)
            .unwrap()
            .index
    }

    #[test]
    fn test_resolve_in_reports_match() {
        let index = index();
        let resolved = resolve_in(
            &index,
            &RuntimeRequest::new(RuntimeType::Node).with_version("0.12"),
        )
        .unwrap();
        assert!(resolved.matched);
        assert_eq!(resolved.package_uri, "https://blob.example/us/node/0.12.exe");
        assert_eq!(resolved.manifest_digest, index.digest().as_str());
    }

    #[test]
    fn test_resolve_in_without_version_uses_default() {
        let resolved = resolve_in(&index(), &RuntimeRequest::new(RuntimeType::Node)).unwrap();
        assert!(!resolved.matched);
        assert_eq!(resolved.version, "0.10");
        assert!(resolved.requested_version.is_none());
    }

    #[test]
    fn test_runtime_catalog() {
        let catalog = runtime_catalog(&index());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].runtime, RuntimeType::Node);
        assert_eq!(catalog[0].default_version.as_deref(), Some("0.10"));
        assert_eq!(catalog[0].versions, vec!["0.12".to_string()]);
        assert_eq!(catalog[1].runtime, RuntimeType::Cache);
        assert!(catalog[1].default_version.is_none());
    }
}
