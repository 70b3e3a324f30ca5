use std::fmt::Display;

use log::{debug, info, warn};

use crate::{
    definition::{DeploymentDefinition, DeploymentId, PredictiveUnitDefinition},
    error::ClusterOperationError,
    identity::derive_identity,
    kubernetes::{DeploymentScope, ServiceOperations, WorkloadOperations, WorkloadRecord},
    resources::labels::get_deployment_selector,
};

use self::plan::{ReconciliationPlan, UnitAction};

#[cfg(test)]
pub(crate) mod fake;
pub mod plan;

/// Identities touched by a reconciliation call, in the order the calls were issued.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
}

impl Display for ReconcileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} deleted",
            self.created.len(),
            self.updated.len(),
            self.deleted.len()
        )
    }
}

/// Syncs the workloads and services of a deployment with its definition.
///
/// Every call lists the cluster anew and never locks anything, so concurrent
/// calls for the same deployment id may interleave. Callers have to serialize
/// reconciliation per deployment id.
pub struct Reconciler<C> {
    cluster: C,
    namespace: String,
}

impl<C> Reconciler<C>
where
    C: WorkloadOperations + ServiceOperations,
{
    pub fn new(cluster: C, namespace: impl Into<String>) -> Self {
        Self {
            cluster,
            namespace: namespace.into(),
        }
    }

    pub fn cluster(&self) -> &C {
        &self.cluster
    }

    fn scope(&self, deployment_id: DeploymentId) -> DeploymentScope<'_> {
        DeploymentScope {
            namespace: &self.namespace,
            deployment_id,
        }
    }

    /// Creates a workload and a service for every unit, assuming none exist yet.
    pub async fn apply_create(
        &self,
        definition: &DeploymentDefinition,
    ) -> Result<ReconcileSummary, ClusterOperationError> {
        info!("Creating Seldon deployment {}...", definition.id);

        let scope = self.scope(definition.id);
        let mut summary = ReconcileSummary::default();

        for unit in definition.units() {
            let identity = derive_identity(definition.id, unit.id);

            self.create_unit(&scope, &identity, unit).await?;
            summary.created.push(identity);
        }

        Ok(summary)
    }

    /// Lists the deployment's workloads and diffs them against the definition
    /// without touching the cluster.
    pub async fn plan<'d>(
        &self,
        definition: &'d DeploymentDefinition,
    ) -> Result<ReconciliationPlan<'d, C::Workload>, ClusterOperationError> {
        let existing = self.list_deployment_workloads(definition.id).await?;

        Ok(ReconciliationPlan::compute(definition, existing))
    }

    /// Deletes workloads that are no longer required, then updates the existing
    /// ones and creates the missing ones in unit order.
    pub async fn apply_update(
        &self,
        definition: &DeploymentDefinition,
    ) -> Result<ReconcileSummary, ClusterOperationError> {
        info!("Updating Seldon deployment {}...", definition.id);

        let plan = self.plan(definition).await?;
        let scope = self.scope(definition.id);
        let mut summary = ReconcileSummary::default();

        debug!(
            "Deployment {}: deleting {:?}, updating {:?}, creating {:?}",
            definition.id,
            plan.deleted_identities(),
            plan.updated_identities(),
            plan.created_identities()
        );

        for workload in &plan.deletions {
            if let Some(name) = self.delete_workload_pair(&scope, workload).await? {
                summary.deleted.push(name);
            }
        }

        for step in &plan.applications {
            match step.action {
                UnitAction::Update => {
                    self.update_unit(&scope, &step.identity, step.unit).await?;
                    summary.updated.push(step.identity.to_owned());
                }
                UnitAction::Create => {
                    self.create_unit(&scope, &step.identity, step.unit).await?;
                    summary.created.push(step.identity.to_owned());
                }
            }
        }

        Ok(summary)
    }

    /// Removes every workload and service labelled with the deployment id.
    pub async fn apply_delete(
        &self,
        deployment_id: DeploymentId,
    ) -> Result<ReconcileSummary, ClusterOperationError> {
        info!("Deleting Seldon deployment {deployment_id}...");

        let existing = self.list_deployment_workloads(deployment_id).await?;
        let scope = self.scope(deployment_id);
        let mut summary = ReconcileSummary::default();

        for workload in &existing {
            if let Some(name) = self.delete_workload_pair(&scope, workload).await? {
                summary.deleted.push(name);
            }
        }

        Ok(summary)
    }

    async fn list_deployment_workloads(
        &self,
        deployment_id: DeploymentId,
    ) -> Result<Vec<C::Workload>, ClusterOperationError> {
        self.cluster
            .list_workloads(&self.namespace, &get_deployment_selector(deployment_id))
            .await
    }

    async fn create_unit(
        &self,
        scope: &DeploymentScope<'_>,
        identity: &str,
        unit: &PredictiveUnitDefinition,
    ) -> Result<(), ClusterOperationError> {
        info!(
            "Deploying predictive unit '{}' of deployment {} as '{identity}'...",
            unit.name, scope.deployment_id
        );

        let workload = self
            .cluster
            .create_workload(scope, identity, &unit.resource_spec)
            .await?;
        self.cluster.create_service(scope, &workload).await?;

        Ok(())
    }

    async fn update_unit(
        &self,
        scope: &DeploymentScope<'_>,
        identity: &str,
        unit: &PredictiveUnitDefinition,
    ) -> Result<(), ClusterOperationError> {
        info!(
            "Updating predictive unit '{}' of deployment {} ('{identity}')...",
            unit.name, scope.deployment_id
        );

        let workload = self
            .cluster
            .update_workload(scope, identity, &unit.resource_spec)
            .await?;
        self.cluster.update_service(scope, &workload).await?;

        Ok(())
    }

    async fn delete_workload_pair(
        &self,
        scope: &DeploymentScope<'_>,
        workload: &C::Workload,
    ) -> Result<Option<String>, ClusterOperationError> {
        let name = match workload.workload_name() {
            Some(name) => name.to_owned(),
            None => {
                warn!("Cluster returned a nameless workload!"); // this shouldn't happen
                return Ok(None);
            }
        };

        self.cluster.delete_workload(scope, workload).await?;
        self.cluster.delete_service(scope, workload).await?;

        Ok(Some(name))
    }
}
