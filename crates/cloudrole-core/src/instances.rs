//! Snapshotting role instances read from disk.

use std::path::Path;

use crate::domain::{load_role_instances, InstanceSnapshot, Result, RoleInstance};
use crate::obs::emit_snapshot_mapped;

/// Map each role instance into a snapshot, preserving input order.
pub fn snapshot_instances(instances: &[RoleInstance]) -> Vec<InstanceSnapshot> {
    instances
        .iter()
        .map(|instance| {
            let snapshot = InstanceSnapshot::from_role_instance(instance);
            emit_snapshot_mapped(
                snapshot.instance_name.as_deref(),
                snapshot.instance_endpoints.len(),
            );
            snapshot
        })
        .collect()
}

/// Read role instances from a JSON file and snapshot them.
pub fn snapshot_file(path: &Path) -> Result<Vec<InstanceSnapshot>> {
    let instances = load_role_instances(path)?;
    Ok(snapshot_instances(&instances))
}
