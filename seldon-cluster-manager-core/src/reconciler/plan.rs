use std::collections::HashSet;

use log::warn;

use crate::{
    definition::{DeploymentDefinition, PredictiveUnitDefinition},
    identity::{derive_identity, required_identities},
    kubernetes::WorkloadRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitAction {
    Create,
    Update,
}

#[derive(Debug, Clone)]
pub struct PlannedUnit<'d> {
    pub identity: String,
    pub unit: &'d PredictiveUnitDefinition,
    pub action: UnitAction,
}

/// Three-way diff between the identities a definition requires and the
/// workloads currently labelled with its deployment id.
#[derive(Debug)]
pub struct ReconciliationPlan<'d, W> {
    /// Existing workloads no longer required, in listing order.
    pub deletions: Vec<W>,
    /// Create or update steps, in unit order.
    pub applications: Vec<PlannedUnit<'d>>,
}

impl<'d, W: WorkloadRecord> ReconciliationPlan<'d, W> {
    pub fn compute(definition: &'d DeploymentDefinition, existing: Vec<W>) -> Self {
        let required = required_identities(definition);
        let existing_names = existing
            .iter()
            .filter_map(|workload| workload.workload_name())
            .map(str::to_owned)
            .collect::<HashSet<_>>();

        let deletions = existing
            .into_iter()
            .filter(|workload| match workload.workload_name() {
                Some(name) => !required.contains(name),
                None => {
                    warn!("Cluster returned a nameless workload!"); // this shouldn't happen
                    false
                }
            })
            .collect();

        let applications = definition
            .units()
            .iter()
            .map(|unit| {
                let identity = derive_identity(definition.id, unit.id);
                let action = if existing_names.contains(&identity) {
                    UnitAction::Update
                } else {
                    UnitAction::Create
                };

                PlannedUnit {
                    identity,
                    unit,
                    action,
                }
            })
            .collect();

        Self {
            deletions,
            applications,
        }
    }

    pub fn deleted_identities(&self) -> Vec<&str> {
        self.deletions
            .iter()
            .filter_map(|workload| workload.workload_name())
            .collect()
    }

    pub fn created_identities(&self) -> Vec<&str> {
        self.identities_with(UnitAction::Create)
    }

    pub fn updated_identities(&self) -> Vec<&str> {
        self.identities_with(UnitAction::Update)
    }

    /// Whether executing the plan changes which workloads exist.
    pub fn changes_membership(&self) -> bool {
        !self.deletions.is_empty()
            || self
                .applications
                .iter()
                .any(|step| step.action == UnitAction::Create)
    }

    fn identities_with(&self, action: UnitAction) -> Vec<&str> {
        self.applications
            .iter()
            .filter(|step| step.action == action)
            .map(|step| step.identity.as_str())
            .collect()
    }
}
