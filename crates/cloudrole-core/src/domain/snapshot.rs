//! Point-in-time copy of a role instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role_instance::{InstanceEndpoint, RoleInstance};

/// Owned copy of one instance endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSnapshot {
    pub name: Option<String>,
    pub vip: Option<String>,
    pub public_port: Option<u16>,
    pub local_port: Option<u16>,
    pub protocol: Option<String>,
}

impl From<&InstanceEndpoint> for EndpointSnapshot {
    fn from(endpoint: &InstanceEndpoint) -> Self {
        EndpointSnapshot {
            name: endpoint.name.clone(),
            vip: endpoint.vip.clone(),
            public_port: endpoint.public_port,
            local_port: endpoint.local_port,
            protocol: endpoint.protocol.clone(),
        }
    }
}

/// Snapshot of a role instance, never re-synchronised with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    pub role_name: Option<String>,
    pub instance_name: Option<String>,
    pub instance_status: Option<String>,
    pub instance_upgrade_domain: Option<u32>,
    pub instance_fault_domain: Option<u32>,
    pub instance_size: Option<String>,
    pub instance_state_details: Option<String>,
    pub instance_error_code: Option<String>,
    pub ip_address: Option<String>,
    /// Same order as the source's endpoint list.
    pub instance_endpoints: Vec<EndpointSnapshot>,
    pub power_state: String,
    pub host_name: Option<String>,
    pub remote_access_certificate_thumbprint: Option<String>,

    /// When the copy was taken.
    pub captured_at: DateTime<Utc>,
}

impl InstanceSnapshot {
    pub fn from_role_instance(instance: &RoleInstance) -> Self {
        Self::taken_at(instance, Utc::now())
    }

    /// Map with an explicit capture time.
    pub fn taken_at(instance: &RoleInstance, captured_at: DateTime<Utc>) -> Self {
        InstanceSnapshot {
            role_name: instance.role_name.clone(),
            instance_name: instance.instance_name.clone(),
            instance_status: instance.instance_status.clone(),
            instance_upgrade_domain: instance.instance_upgrade_domain,
            instance_fault_domain: instance.instance_fault_domain,
            instance_size: instance.instance_size.clone(),
            instance_state_details: instance.instance_state_details.clone(),
            instance_error_code: instance.instance_error_code.clone(),
            ip_address: instance.ip_address.clone(),
            instance_endpoints: instance
                .instance_endpoints
                .iter()
                .map(EndpointSnapshot::from)
                .collect(),
            power_state: instance.power_state.to_string(),
            host_name: instance.host_name.clone(),
            remote_access_certificate_thumbprint: instance
                .remote_access_certificate_thumbprint
                .clone(),
            captured_at,
        }
    }
}

impl From<&RoleInstance> for InstanceSnapshot {
    fn from(instance: &RoleInstance) -> Self {
        InstanceSnapshot::from_role_instance(instance)
    }
}
