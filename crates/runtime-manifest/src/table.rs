//! Per-runtime partition of manifest packages.

use tracing::warn;

use crate::package::RuntimePackage;
use crate::runtime::RuntimeType;

/// Packages declared for one runtime type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeSlot {
    /// Non-default packages in document order
    pub candidates: Vec<RuntimePackage>,
    pub default: Option<RuntimePackage>,
}

/// Packages partitioned by runtime type.
///
/// A slot exists only for runtime types the manifest declared at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageTable {
    slots: [Option<RuntimeSlot>; RuntimeType::COUNT],
}

impl PackageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a package under its runtime type.
    ///
    /// A default replaces any earlier default for the same runtime; the
    /// replaced package is dropped, not demoted to a candidate.
    pub fn add(&mut self, package: RuntimePackage) {
        let runtime = package.runtime;
        let slot = self.slots[runtime.index()].get_or_insert_with(RuntimeSlot::default);

        if package.is_default {
            if let Some(previous) = slot.default.replace(package) {
                warn!(
                    runtime = %runtime,
                    replaced_version = %previous.version,
                    "Runtime manifest declares more than one default package; keeping the last"
                );
            }
        } else {
            slot.candidates.push(package);
        }
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn get(&self, runtime: RuntimeType) -> Option<&RuntimeSlot> {
        self.slots[runtime.index()].as_ref()
    }

    /// Runtime types with at least one declared package, in table order.
    pub fn runtimes(&self) -> impl Iterator<Item = RuntimeType> + '_ {
        RuntimeType::ALL
            .into_iter()
            .filter(move |rt| self.slots[rt.index()].is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Total number of packages held, defaults included.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .map(|slot| slot.candidates.len() + usize::from(slot.default.is_some()))
            .sum()
    }
}
