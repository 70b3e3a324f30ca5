use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;

use crate::{
    definition::{ClusterResources, DeploymentId},
    error::{ClusterOperationError, InitializationError},
};

pub mod cluster;
pub mod connector;
pub mod operations;

/// Namespace and deployment every collaborator call is made on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentScope<'a> {
    pub namespace: &'a str,
    pub deployment_id: DeploymentId,
}

pub trait WorkloadRecord {
    fn workload_name(&self) -> Option<&str>;
}

impl WorkloadRecord for Deployment {
    fn workload_name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }
}

#[async_trait]
pub trait ClusterClient: Send + Sync {
    type Workload: WorkloadRecord + Send + Sync;

    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterOperationError>;

    async fn list_workloads(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Self::Workload>, ClusterOperationError>;
}

#[async_trait]
pub trait WorkloadOperations: ClusterClient {
    async fn create_workload(
        &self,
        scope: &DeploymentScope<'_>,
        identity: &str,
        resources: &ClusterResources,
    ) -> Result<Self::Workload, ClusterOperationError>;

    async fn update_workload(
        &self,
        scope: &DeploymentScope<'_>,
        identity: &str,
        resources: &ClusterResources,
    ) -> Result<Self::Workload, ClusterOperationError>;

    async fn delete_workload(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &Self::Workload,
    ) -> Result<(), ClusterOperationError>;
}

/// Operations on the service paired with a workload.
#[async_trait]
pub trait ServiceOperations: ClusterClient {
    type Service: Send + Sync;

    async fn create_service(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &Self::Workload,
    ) -> Result<Self::Service, ClusterOperationError>;

    async fn update_service(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &Self::Workload,
    ) -> Result<Self::Service, ClusterOperationError>;

    async fn delete_service(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &Self::Workload,
    ) -> Result<(), ClusterOperationError>;
}

/// Establishes the connection a `ClusterManager` reconciles through.
#[async_trait]
pub trait Connector: Send + Sync {
    type Cluster: WorkloadOperations + ServiceOperations;

    async fn connect(&self) -> Result<Self::Cluster, InitializationError>;
}
