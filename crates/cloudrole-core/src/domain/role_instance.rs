//! Role instance resource as returned by the compute management API.
//!
//! Field names follow the API's PascalCase JSON. Every descriptive field is
//! optional because the API omits what it does not know.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

use crate::domain::Result;

/// Power state reported for a role instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub enum PowerState {
    #[default]
    Unknown,
    Starting,
    Started,
    Stopping,
    Stopped,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PowerState::Unknown => "Unknown",
            PowerState::Starting => "Starting",
            PowerState::Started => "Started",
            PowerState::Stopping => "Stopping",
            PowerState::Stopped => "Stopped",
        };
        f.write_str(text)
    }
}

impl From<Option<String>> for PowerState {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().unwrap_or_default() {
            "Starting" => PowerState::Starting,
            "Started" => PowerState::Started,
            "Stopping" => PowerState::Stopping,
            "Stopped" => PowerState::Stopped,
            _ => PowerState::Unknown,
        }
    }
}

/// Public endpoint exposed by a role instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InstanceEndpoint {
    pub name: Option<String>,
    pub vip: Option<String>,
    pub public_port: Option<u16>,
    pub local_port: Option<u16>,
    pub protocol: Option<String>,
}

/// One running instance of a deployed role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RoleInstance {
    pub role_name: Option<String>,
    pub instance_name: Option<String>,
    pub instance_status: Option<String>,
    pub instance_upgrade_domain: Option<u32>,
    pub instance_fault_domain: Option<u32>,
    pub instance_size: Option<String>,
    pub instance_state_details: Option<String>,
    pub instance_error_code: Option<String>,
    pub ip_address: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub instance_endpoints: Vec<InstanceEndpoint>,
    pub power_state: PowerState,
    pub host_name: Option<String>,
    pub remote_access_certificate_thumbprint: Option<String>,
}

/// A `null` list reads as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RoleInstance>),
    One(Box<RoleInstance>),
}

/// Read role instances from a JSON file holding one instance or an array.
pub fn load_role_instances(path: &Path) -> Result<Vec<RoleInstance>> {
    let content = std::fs::read_to_string(path)?;
    let instances = match serde_json::from_str::<OneOrMany>(&content)? {
        OneOrMany::Many(instances) => instances,
        OneOrMany::One(instance) => vec![*instance],
    };
    Ok(instances)
}
