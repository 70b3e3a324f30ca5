use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use kube::error::ErrorResponse;

use crate::{
    definition::{ClusterResources, DeploymentId},
    error::{ClusterOperationError, InitializationError},
    kubernetes::{
        ClusterClient, Connector, DeploymentScope, ServiceOperations, WorkloadOperations,
        WorkloadRecord,
    },
    resources::labels::get_deployment_selector,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListNamespaces,
    ListWorkloads(String),
    CreateWorkload(String),
    UpdateWorkload(String),
    DeleteWorkload(String),
    CreateService(String),
    UpdateService(String),
    DeleteService(String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::ListNamespaces | Call::ListWorkloads(_))
    }

    pub fn is_deletion(&self) -> bool {
        matches!(self, Call::DeleteWorkload(_) | Call::DeleteService(_))
    }
}

#[derive(Debug, Clone)]
pub struct FakeWorkload {
    pub name: Option<String>,
    pub deployment_id: DeploymentId,
    pub resources: Option<ClusterResources>,
}

impl WorkloadRecord for FakeWorkload {
    fn workload_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Default)]
struct FakeState {
    workloads: Vec<FakeWorkload>,
    services: BTreeMap<String, DeploymentId>,
    calls: Vec<Call>,
    failing_call: Option<Call>,
}

/// In-memory single-namespace cluster that records every collaborator call.
#[derive(Default)]
pub struct FakeCluster {
    state: Mutex<FakeState>,
}

pub fn api_error(code: u16) -> ClusterOperationError {
    ClusterOperationError::KubeApi(kube::Error::Api(ErrorResponse {
        status: "Failure".to_owned(),
        message: "injected failure".to_owned(),
        reason: "Injected".to_owned(),
        code,
    }))
}

impl FakeCluster {
    pub fn with_workloads(identities: &[(DeploymentId, &str)]) -> Self {
        let cluster = Self::default();

        {
            let mut state = cluster.state();
            for (deployment_id, name) in identities {
                state.workloads.push(FakeWorkload {
                    name: Some(name.to_string()),
                    deployment_id: *deployment_id,
                    resources: None,
                });
                state.services.insert(name.to_string(), *deployment_id);
            }
        }

        cluster
    }

    pub fn with_nameless_workload(self, deployment_id: DeploymentId) -> Self {
        self.state().workloads.push(FakeWorkload {
            name: None,
            deployment_id,
            resources: None,
        });

        self
    }

    /// Makes the next matching call fail once.
    pub fn failing_on(self, call: Call) -> Self {
        self.state().failing_call = Some(call);

        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn workload_names(&self) -> Vec<String> {
        let mut names = self
            .state()
            .workloads
            .iter()
            .filter_map(|w| w.name.to_owned())
            .collect::<Vec<_>>();
        names.sort();

        names
    }

    pub fn service_names(&self) -> Vec<String> {
        self.state().services.keys().cloned().collect()
    }

    pub fn workload(&self, name: &str) -> Option<FakeWorkload> {
        self.state()
            .workloads
            .iter()
            .find(|w| w.name.as_deref() == Some(name))
            .cloned()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn record(&self, call: Call) -> Result<MutexGuard<'_, FakeState>, ClusterOperationError> {
        let mut state = self.state();

        state.calls.push(call.clone());

        if state.failing_call.as_ref() == Some(&call) {
            state.failing_call = None;
            return Err(api_error(500));
        }

        Ok(state)
    }
}

fn require_name(workload: &FakeWorkload) -> Result<&str, ClusterOperationError> {
    workload
        .name
        .as_deref()
        .ok_or(ClusterOperationError::MissingObjectMetadata)
}

#[async_trait]
impl ClusterClient for FakeCluster {
    type Workload = FakeWorkload;

    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterOperationError> {
        self.record(Call::ListNamespaces)?;

        Ok(vec!["default".to_owned(), "kube-system".to_owned()])
    }

    async fn list_workloads(
        &self,
        _namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<FakeWorkload>, ClusterOperationError> {
        let state = self.record(Call::ListWorkloads(label_selector.to_owned()))?;

        Ok(state
            .workloads
            .iter()
            .filter(|w| get_deployment_selector(w.deployment_id) == label_selector)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl WorkloadOperations for FakeCluster {
    async fn create_workload(
        &self,
        scope: &DeploymentScope<'_>,
        identity: &str,
        resources: &ClusterResources,
    ) -> Result<FakeWorkload, ClusterOperationError> {
        let mut state = self.record(Call::CreateWorkload(identity.to_owned()))?;

        if state
            .workloads
            .iter()
            .any(|w| w.name.as_deref() == Some(identity))
        {
            return Err(api_error(409));
        }

        let workload = FakeWorkload {
            name: Some(identity.to_owned()),
            deployment_id: scope.deployment_id,
            resources: Some(resources.to_owned()),
        };
        state.workloads.push(workload.clone());

        Ok(workload)
    }

    async fn update_workload(
        &self,
        scope: &DeploymentScope<'_>,
        identity: &str,
        resources: &ClusterResources,
    ) -> Result<FakeWorkload, ClusterOperationError> {
        let mut state = self.record(Call::UpdateWorkload(identity.to_owned()))?;
        let workload = FakeWorkload {
            name: Some(identity.to_owned()),
            deployment_id: scope.deployment_id,
            resources: Some(resources.to_owned()),
        };

        state
            .workloads
            .retain(|w| w.name.as_deref() != Some(identity));
        state.workloads.push(workload.clone());

        Ok(workload)
    }

    async fn delete_workload(
        &self,
        _scope: &DeploymentScope<'_>,
        workload: &FakeWorkload,
    ) -> Result<(), ClusterOperationError> {
        let name = require_name(workload)?;
        let mut state = self.record(Call::DeleteWorkload(name.to_owned()))?;

        state.workloads.retain(|w| w.name.as_deref() != Some(name));

        Ok(())
    }
}

#[async_trait]
impl ServiceOperations for FakeCluster {
    type Service = String;

    async fn create_service(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &FakeWorkload,
    ) -> Result<String, ClusterOperationError> {
        let name = require_name(workload)?;
        let mut state = self.record(Call::CreateService(name.to_owned()))?;

        if state.services.contains_key(name) {
            return Err(api_error(409));
        }

        state.services.insert(name.to_owned(), scope.deployment_id);

        Ok(name.to_owned())
    }

    async fn update_service(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &FakeWorkload,
    ) -> Result<String, ClusterOperationError> {
        let name = require_name(workload)?;
        let mut state = self.record(Call::UpdateService(name.to_owned()))?;

        state.services.insert(name.to_owned(), scope.deployment_id);

        Ok(name.to_owned())
    }

    async fn delete_service(
        &self,
        _scope: &DeploymentScope<'_>,
        workload: &FakeWorkload,
    ) -> Result<(), ClusterOperationError> {
        let name = require_name(workload)?;
        let mut state = self.record(Call::DeleteService(name.to_owned()))?;

        state.services.remove(name);

        Ok(())
    }
}

pub enum FakeConnector {
    Unreachable,
    FailingProbe,
    Healthy(&'static [(DeploymentId, &'static str)]),
}

#[async_trait]
impl Connector for FakeConnector {
    type Cluster = FakeCluster;

    async fn connect(&self) -> Result<FakeCluster, InitializationError> {
        match self {
            FakeConnector::Unreachable => Err(InitializationError::InvalidMasterUrl(
                "not a url".to_owned(),
            )),
            FakeConnector::FailingProbe => Ok(FakeCluster::default().failing_on(Call::ListNamespaces)),
            FakeConnector::Healthy(workloads) => Ok(FakeCluster::with_workloads(workloads)),
        }
    }
}
