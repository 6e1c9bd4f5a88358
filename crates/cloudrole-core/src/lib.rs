//! cloudrole Core Library
//!
//! Re-exports core components for programmatic access to cloudrole:
//! role instance snapshots and runtime resolution against the published
//! runtime manifest.

pub mod domain;
pub mod instances;
pub mod obs;
pub mod runtime;
pub mod telemetry;

pub use domain::{
    load_role_instances, CoreError, EndpointSnapshot, InstanceEndpoint, InstanceSnapshot,
    PowerState, Result, RoleInstance,
};

pub use instances::{snapshot_file, snapshot_instances};

pub use runtime::{
    load_manifest, resolve_in, resolve_runtime, runtime_catalog, ResolvedRuntime, RuntimeListing,
};

pub use runtime_manifest::{
    HttpManifestFetcher, Location, ManifestConfig, ManifestError, ManifestFetcher,
    RuntimeManifestIndex, RuntimeRequest, RuntimeType,
};

pub use telemetry::init_tracing;
