use async_trait::async_trait;
use k8s_openapi::api::{apps::v1::Deployment, core::v1::Service};
use kube::{
    api::{DeleteParams, PatchParams, PostParams},
    Client,
};

use crate::{
    definition::ClusterResources,
    error::ClusterOperationError,
    helpers::RequireMetadata,
    resources::{service::generate_service, workload::generate_workload},
    FIELD_MANAGER,
};

use super::{
    operations::{
        apply_resource, create_resource, list_labelled_resources, list_namespace_names,
        remove_resource,
    },
    ClusterClient, DeploymentScope, ServiceOperations, WorkloadOperations,
};

/// Workloads are `apps/v1` deployments, each fronted by a service of the same name.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn post_params() -> PostParams {
        PostParams {
            field_manager: Some(FIELD_MANAGER.to_owned()),
            ..Default::default()
        }
    }

    fn patch_params() -> PatchParams {
        PatchParams::apply(FIELD_MANAGER).force()
    }
}

#[async_trait]
impl ClusterClient for KubeCluster {
    type Workload = Deployment;

    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterOperationError> {
        list_namespace_names(&self.client).await
    }

    async fn list_workloads(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Deployment>, ClusterOperationError> {
        list_labelled_resources(&self.client, namespace, label_selector).await
    }
}

#[async_trait]
impl WorkloadOperations for KubeCluster {
    async fn create_workload(
        &self,
        scope: &DeploymentScope<'_>,
        identity: &str,
        resources: &ClusterResources,
    ) -> Result<Deployment, ClusterOperationError> {
        let workload = generate_workload(scope, identity, resources)?;

        create_resource(&self.client, &workload, &Self::post_params()).await
    }

    async fn update_workload(
        &self,
        scope: &DeploymentScope<'_>,
        identity: &str,
        resources: &ClusterResources,
    ) -> Result<Deployment, ClusterOperationError> {
        let workload = generate_workload(scope, identity, resources)?;

        apply_resource(&self.client, &workload, &Self::patch_params()).await
    }

    async fn delete_workload(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &Deployment,
    ) -> Result<(), ClusterOperationError> {
        let name = workload.require_name_or(ClusterOperationError::MissingObjectMetadata)?;

        remove_resource::<Deployment>(&self.client, name, scope.namespace, &DeleteParams::default())
            .await
    }
}

#[async_trait]
impl ServiceOperations for KubeCluster {
    type Service = Service;

    async fn create_service(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &Deployment,
    ) -> Result<Service, ClusterOperationError> {
        let service = generate_service(scope, workload)?;

        create_resource(&self.client, &service, &Self::post_params()).await
    }

    async fn update_service(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &Deployment,
    ) -> Result<Service, ClusterOperationError> {
        let service = generate_service(scope, workload)?;

        apply_resource(&self.client, &service, &Self::patch_params()).await
    }

    async fn delete_service(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &Deployment,
    ) -> Result<(), ClusterOperationError> {
        let name = workload.require_name_or(ClusterOperationError::MissingObjectMetadata)?;

        remove_resource::<Service>(&self.client, name, scope.namespace, &DeleteParams::default())
            .await
    }
}
