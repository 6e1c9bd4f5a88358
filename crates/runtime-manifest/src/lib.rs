//! Runtime-Manifest: runtime package resolution for cloudrole
//!
//! This crate loads the published runtime manifest, an XML document that
//! lists the runtime packages available to cloud service roles and the
//! blob container each datacenter downloads them from.
//!
//! ## Flow
//!
//! 1. Pick a [`ManifestSource`] (local file or the well-known address).
//! 2. [`ManifestLoad::build`] reads it once and indexes it for a [`Location`].
//! 3. [`RuntimeManifestIndex::find_match`] answers [`RuntimeRequest`]s,
//!    falling back to each runtime's default package.

pub mod config;
pub mod error;
pub mod fakes;
pub mod index;
pub mod location;
pub mod package;
pub mod runtime;
pub mod source;
pub mod table;

pub use config::{ManifestConfig, DEFAULT_MANIFEST_URL};
pub use error::ManifestError;
pub use index::{ManifestDigest, ManifestLoad, RuntimeManifestIndex, RuntimeMatch};
pub use location::{Datacenter, Location};
pub use package::RuntimePackage;
pub use runtime::{RuntimeRequest, RuntimeType};
pub use source::{HttpManifestFetcher, ManifestFetcher, ManifestSource, ManifestStream};
pub use table::{PackageTable, RuntimeSlot};

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;
