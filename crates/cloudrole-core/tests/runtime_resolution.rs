use cloudrole_core::{
    load_manifest, resolve_runtime, CoreError, Location, ManifestConfig, ManifestError,
    RuntimeRequest, RuntimeType,
};
use runtime_manifest::fakes::StaticManifestFetcher;
use tempfile::tempdir;

const MANIFEST_URL: &str = "https://manifests.example.com/runtimemanifest.xml";

const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<runtimemanifest>
  <baseuri>
    <blobcontainer datacenter="US" uri="https://blob.example/us"/>
  </baseuri>
  <runtimes>
    <runtime type="node" version="0.10" default="true" filepath="/node/0.10.exe"/>
    <runtime type="node" version="0.12" filepath="/node/0.12.exe"/>
    <runtime type="php" version="5.4" default="true" filepath="/php/5.4.exe"/>
  </runtimes>
</runtimemanifest>"#;

fn fetcher() -> StaticManifestFetcher {
    StaticManifestFetcher::new().with_document(MANIFEST_URL, MANIFEST)
}

#[tokio::test]
async fn resolves_explicit_match_from_remote_manifest() {
    let resolved = resolve_runtime(
        Location::WestUs,
        None,
        &RuntimeRequest::new(RuntimeType::Node).with_version("0.12"),
        &ManifestConfig::new(MANIFEST_URL),
        &fetcher(),
    )
    .await
    .expect("resolve");

    assert!(resolved.matched);
    assert_eq!(resolved.version, "0.12");
    assert_eq!(resolved.package_uri, "https://blob.example/us/node/0.12.exe");
    assert_eq!(resolved.requested_version.as_deref(), Some("0.12"));
}

#[tokio::test]
async fn falls_back_to_default_package() {
    let resolved = resolve_runtime(
        Location::WestUs,
        None,
        &RuntimeRequest::new(RuntimeType::Node).with_version("0.8"),
        &ManifestConfig::new(MANIFEST_URL),
        &fetcher(),
    )
    .await
    .expect("resolve");

    assert!(!resolved.matched);
    assert_eq!(resolved.version, "0.10");
}

#[tokio::test]
async fn local_manifest_path_overrides_address() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("runtimemanifest.xml");
    std::fs::write(&path, MANIFEST).unwrap();
    let fetcher = StaticManifestFetcher::new();

    let resolved = resolve_runtime(
        Location::EastUs,
        Some(path.as_path()),
        &RuntimeRequest::new(RuntimeType::Php),
        &ManifestConfig::new(MANIFEST_URL),
        &fetcher,
    )
    .await
    .expect("resolve");

    assert_eq!(resolved.version, "5.4");
    assert_eq!(fetcher.fetch_count(), 0);
}

#[tokio::test]
async fn location_without_container_fails_load() {
    let err = load_manifest(
        Location::NorthEurope,
        None,
        &ManifestConfig::new(MANIFEST_URL),
        &fetcher(),
    )
    .await
    .unwrap_err();

    match err {
        CoreError::ManifestLoadFailed {
            base_uri_found,
            packages_retrieved,
            ..
        } => {
            assert!(!base_uri_found);
            assert!(packages_retrieved);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn undeclared_runtime_surfaces_lookup_error() {
    let err = resolve_runtime(
        Location::WestUs,
        None,
        &RuntimeRequest::new(RuntimeType::Java).with_version("8"),
        &ManifestConfig::new(MANIFEST_URL),
        &fetcher(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::Manifest(ManifestError::RuntimeNotDeclared(RuntimeType::Java))
    ));
}

#[tokio::test]
async fn same_manifest_resolves_deterministically() {
    let config = ManifestConfig::new(MANIFEST_URL);
    let fetcher = fetcher();
    let request = RuntimeRequest::new(RuntimeType::Node).with_version("0.12");

    let first = resolve_runtime(Location::WestUs, None, &request, &config, &fetcher)
        .await
        .unwrap();
    let second = resolve_runtime(Location::WestUs, None, &request, &config, &fetcher)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.fetch_count(), 2);
}
