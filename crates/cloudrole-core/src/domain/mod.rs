//! Domain types for cloudrole.

pub mod error;
pub mod role_instance;
pub mod snapshot;

pub use error::{CoreError, Result};
pub use role_instance::{load_role_instances, InstanceEndpoint, PowerState, RoleInstance};
pub use snapshot::{EndpointSnapshot, InstanceSnapshot};
