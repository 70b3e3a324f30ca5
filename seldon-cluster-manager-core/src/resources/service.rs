use k8s_openapi::{
    api::{
        apps::v1::Deployment,
        core::v1::{ContainerPort, Service, ServicePort, ServiceSpec},
    },
    apimachinery::pkg::util::intstr::IntOrString,
};
use kube::core::ObjectMeta;

use crate::{helpers::RequireMetadata, kubernetes::DeploymentScope};

use super::{
    labels::{get_pod_selector_labels, get_workload_labels},
    ResourceGenerationError,
};

/// Builds the ClusterIP service paired with a workload; it shares the workload's name.
pub fn generate_service(
    scope: &DeploymentScope,
    workload: &Deployment,
) -> Result<Service, ResourceGenerationError> {
    let identity = workload.require_name_or(ResourceGenerationError::DependentMissingMetadataName)?;
    let exposed_port = extract_exposed_port(workload)?;
    let port_name = exposed_port
        .name
        .as_ref()
        .map(|name| IntOrString::String(name.to_owned()))
        .unwrap_or(IntOrString::Int(exposed_port.container_port));

    Ok(Service {
        metadata: ObjectMeta {
            name: Some(identity.to_owned()),
            namespace: Some(scope.namespace.to_owned()),
            labels: Some(get_workload_labels(scope.deployment_id, identity)),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(get_pod_selector_labels(identity)),
            type_: Some("ClusterIP".to_owned()),
            ports: Some(vec![ServicePort {
                name: exposed_port.name.to_owned(),
                port: exposed_port.container_port,
                protocol: exposed_port.protocol.to_owned(),
                target_port: Some(port_name),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn extract_exposed_port(workload: &Deployment) -> Result<&ContainerPort, ResourceGenerationError> {
    workload
        .spec
        .as_ref()
        .and_then(|spec| spec.template.spec.as_ref())
        .and_then(|pod| pod.containers.first())
        .and_then(|container| container.ports.as_ref())
        .and_then(|ports| ports.first())
        .ok_or(ResourceGenerationError::DependentMissingData(
            "container port".into(),
        ))
}
