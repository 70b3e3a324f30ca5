use log::info;

use crate::{
    definition::{DeploymentDefinition, DeploymentId},
    error::{InitializationError, ManagerError},
    kubernetes::{connector::KubeConnector, ClusterClient, Connector},
    reconciler::{plan::ReconciliationPlan, ReconcileSummary, Reconciler},
};

use self::config::ManagerConfig;

pub mod config;

/// Owns the cluster connection between `init` and `cleanup`.
pub struct ClusterManager<K: Connector> {
    connector: K,
    namespace: String,
    reconciler: Option<Reconciler<K::Cluster>>,
}

impl ClusterManager<KubeConnector> {
    pub fn from_config(config: ManagerConfig) -> Self {
        let namespace = config.namespace.to_owned();

        Self::new(KubeConnector::new(config), namespace)
    }
}

impl<K: Connector> ClusterManager<K> {
    pub fn new(connector: K, namespace: impl Into<String>) -> Self {
        Self {
            connector,
            namespace: namespace.into(),
            reconciler: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.reconciler.is_some()
    }

    /// Connects to the cluster and checks the connection by listing namespaces.
    /// Returns the number of namespaces seen by the probe.
    pub async fn init(&mut self) -> Result<usize, InitializationError> {
        info!("Initializing cluster manager for '{}' namespace...", self.namespace);

        let cluster = self.connector.connect().await?;
        let namespaces = cluster
            .list_namespaces()
            .await
            .map_err(InitializationError::Probe)?;

        info!(
            "Cluster connectivity check passed ({} namespaces visible)",
            namespaces.len()
        );

        self.reconciler = Some(Reconciler::new(cluster, self.namespace.to_owned()));

        Ok(namespaces.len())
    }

    /// Releases the connection, does nothing when there is none.
    pub fn cleanup(&mut self) {
        if self.reconciler.take().is_some() {
            info!("Released cluster connection");
        }
    }

    pub async fn apply_create(
        &self,
        definition: &DeploymentDefinition,
    ) -> Result<ReconcileSummary, ManagerError> {
        Ok(self.reconciler()?.apply_create(definition).await?)
    }

    pub async fn apply_update(
        &self,
        definition: &DeploymentDefinition,
    ) -> Result<ReconcileSummary, ManagerError> {
        Ok(self.reconciler()?.apply_update(definition).await?)
    }

    pub async fn apply_delete(
        &self,
        deployment_id: DeploymentId,
    ) -> Result<ReconcileSummary, ManagerError> {
        Ok(self.reconciler()?.apply_delete(deployment_id).await?)
    }

    pub async fn plan<'d>(
        &self,
        definition: &'d DeploymentDefinition,
    ) -> Result<ReconciliationPlan<'d, <K::Cluster as ClusterClient>::Workload>, ManagerError>
    {
        Ok(self.reconciler()?.plan(definition).await?)
    }

    fn reconciler(&self) -> Result<&Reconciler<K::Cluster>, ManagerError> {
        self.reconciler.as_ref().ok_or(ManagerError::NotInitialized)
    }
}
