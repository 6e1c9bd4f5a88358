//! Structured observability hooks for manifest and snapshot operations.
//!
//! Events are emitted at `info!` level with an `event` field naming them,
//! so they can be filtered in JSON log pipelines.

use runtime_manifest::{Location, ManifestLoad, RuntimeMatch, RuntimeRequest};
use tracing::info;

/// Span tagging everything logged while a manifest is loaded.
///
/// Attach it to the load future with [`tracing::Instrument::instrument`].
pub fn manifest_span(origin: &str, location: Location) -> tracing::Span {
    tracing::info_span!("cloudrole.manifest", origin = %origin, location = %location)
}

/// Emit event: manifest loaded, with both load flags and the document digest.
pub fn emit_manifest_loaded(load: &ManifestLoad) {
    info!(
        event = "manifest.loaded",
        location = %load.index.location(),
        digest = %load.index.digest().short(),
        base_uri_found = load.base_uri_found,
        packages_retrieved = load.packages_retrieved,
        success = load.is_success(),
    );
}

/// Emit event: a runtime request was resolved to a package.
pub fn emit_runtime_resolved(request: &RuntimeRequest, found: &RuntimeMatch<'_>) {
    info!(
        event = "runtime.resolved",
        runtime = %request.runtime,
        requested_version = request.version.as_deref().unwrap_or("-"),
        version = %found.package.version,
        matched = found.matched,
    );
}

/// Emit event: a role instance was copied into a snapshot.
pub fn emit_snapshot_mapped(instance_name: Option<&str>, endpoints: usize) {
    info!(
        event = "instance.snapshot_mapped",
        instance_name = instance_name.unwrap_or("-"),
        endpoints = endpoints,
    );
}
