use std::collections::BTreeMap;

use crate::{definition::DeploymentId, FIELD_MANAGER};

pub const DEPLOYMENT_ID_LABEL: &str = "seldon-deployment-id";
pub const APP_LABEL: &str = "seldon-app";
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

pub fn get_deployment_selector(deployment_id: DeploymentId) -> String {
    format!("{DEPLOYMENT_ID_LABEL}={deployment_id}")
}

/// Labels carried by every workload and service of a deployment.
pub fn get_workload_labels(deployment_id: DeploymentId, identity: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (DEPLOYMENT_ID_LABEL.to_owned(), deployment_id.to_string()),
        (APP_LABEL.to_owned(), identity.to_owned()),
        (MANAGED_BY_LABEL.to_owned(), FIELD_MANAGER.to_owned()),
    ])
}

/// Pod selector shared by the workload template and its service.
pub fn get_pod_selector_labels(identity: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(APP_LABEL.to_owned(), identity.to_owned())])
}
