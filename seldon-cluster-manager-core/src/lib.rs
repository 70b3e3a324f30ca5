pub mod definition;
pub mod error;
pub mod helpers;
pub mod identity;
pub mod kubernetes;
pub mod manager;
pub mod reconciler;
pub mod resources;

pub const FIELD_MANAGER: &str = "seldon-cluster-manager";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_MASTER_URL: &str = "http://localhost:8001/";
