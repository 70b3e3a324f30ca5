use thiserror::Error;

use crate::{
    definition::{DeploymentId, PredictiveUnitId},
    resources::ResourceGenerationError,
};

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Couldn't load kubeconfig! Reason: {}", .0)]
    Kubeconfig(kube::config::KubeconfigError),
    #[error("Couldn't infer the client configuration! Reason: {}", .0)]
    InferConfig(kube::config::InferConfigError),
    #[error("'{}' is not a valid cluster URL!", .0)]
    InvalidMasterUrl(String),
    #[error("Couldn't create the cluster client! Reason: {}", .0)]
    Client(kube::Error),
    #[error("Cluster connectivity check failed! Reason: {}", .0)]
    Probe(ClusterOperationError),
}

/// Failure raised by a cluster collaborator. The reconciler never translates these.
#[derive(Debug, Error)]
pub enum ClusterOperationError {
    #[error("Kubernetes API call failed! Reason: {}", .0)]
    KubeApi(kube::Error),
    #[error("Couldn't generate the resource! Reason: {}", .0)]
    ResourceGeneration(ResourceGenerationError),
    #[error("Object is missing metadata!")]
    MissingObjectMetadata,
}

impl From<kube::Error> for ClusterOperationError {
    fn from(error: kube::Error) -> Self {
        Self::KubeApi(error)
    }
}

impl From<ResourceGenerationError> for ClusterOperationError {
    fn from(error: ResourceGenerationError) -> Self {
        Self::ResourceGeneration(error)
    }
}

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Cluster manager isn't initialized!")]
    NotInitialized,
    #[error(transparent)]
    ClusterOperation(#[from] ClusterOperationError),
}

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Couldn't read the deployment definition! Reason: {}", .0)]
    Io(std::io::Error),
    #[error("Couldn't parse the deployment definition! Reason: {}", .0)]
    Parse(String),
    #[error("Deployment {deployment_id} defines predictive unit {unit_id} more than once!")]
    DuplicateUnitId {
        deployment_id: DeploymentId,
        unit_id: PredictiveUnitId,
    },
}
