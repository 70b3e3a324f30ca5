use std::collections::BTreeMap;

use k8s_openapi::{
    api::{
        apps::v1::{Deployment, DeploymentSpec},
        core::v1::{
            Container, ContainerPort, EnvVar, PodSpec, PodTemplateSpec, ResourceRequirements,
        },
    },
    apimachinery::pkg::{api::resource::Quantity, apis::meta::v1::LabelSelector},
};
use kube::core::ObjectMeta;

use crate::{definition::ClusterResources, kubernetes::DeploymentScope};

use super::{
    labels::{get_pod_selector_labels, get_workload_labels},
    ResourceGenerationError,
};

pub const EXPOSED_PORT_NAME: &str = "http";
pub const EXPOSED_PORT_PROTOCOL: &str = "TCP";

pub fn generate_workload(
    scope: &DeploymentScope,
    identity: &str,
    resources: &ClusterResources,
) -> Result<Deployment, ResourceGenerationError> {
    if resources.image.trim().is_empty() {
        return Err(ResourceGenerationError::InvalidData(
            format!("'{identity}' has an empty image name").into(),
        ));
    }

    if resources.replicas < 0 {
        return Err(ResourceGenerationError::InvalidData(
            format!("'{identity}' requests {} replicas", resources.replicas).into(),
        ));
    }

    if !(1..=65535).contains(&resources.container_port) {
        return Err(ResourceGenerationError::InvalidData(
            format!("'{identity}' exposes port {}", resources.container_port).into(),
        ));
    }

    let labels = get_workload_labels(scope.deployment_id, identity);
    let selector_labels = get_pod_selector_labels(identity);

    Ok(Deployment {
        metadata: ObjectMeta {
            name: Some(identity.to_owned()),
            namespace: Some(scope.namespace.to_owned()),
            labels: Some(labels.to_owned()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(resources.replicas),
            selector: LabelSelector {
                match_expressions: None,
                match_labels: Some(selector_labels),
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: identity.to_owned(),
                        image: Some(resources.image_reference()),
                        env: get_env(resources),
                        ports: Some(vec![ContainerPort {
                            name: Some(EXPOSED_PORT_NAME.to_owned()),
                            container_port: resources.container_port,
                            protocol: Some(EXPOSED_PORT_PROTOCOL.to_owned()),
                            ..Default::default()
                        }]),
                        resources: get_resource_requirements(resources),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn get_env(resources: &ClusterResources) -> Option<Vec<EnvVar>> {
    if resources.env.is_empty() {
        return None;
    }

    Some(
        resources
            .env
            .iter()
            .map(|(name, value)| EnvVar {
                name: name.to_owned(),
                value: Some(value.to_owned()),
                ..Default::default()
            })
            .collect(),
    )
}

fn get_resource_requirements(resources: &ClusterResources) -> Option<ResourceRequirements> {
    let mut requests = BTreeMap::new();

    if let Some(cpu) = &resources.cpu {
        requests.insert("cpu".to_owned(), Quantity(cpu.to_owned()));
    }

    if let Some(memory) = &resources.memory {
        requests.insert("memory".to_owned(), Quantity(memory.to_owned()));
    }

    if requests.is_empty() {
        return None;
    }

    Some(ResourceRequirements {
        requests: Some(requests),
        ..Default::default()
    })
}
