use std::collections::BTreeSet;

use crate::definition::{DeploymentDefinition, DeploymentId, PredictiveUnitId};

pub const IDENTITY_PREFIX: &str = "sd";

/// Name shared by the workload and the service of a single predictive unit.
pub fn derive_identity(deployment_id: DeploymentId, unit_id: PredictiveUnitId) -> String {
    format!("{IDENTITY_PREFIX}-{deployment_id}-{unit_id}")
}

pub fn required_identities(definition: &DeploymentDefinition) -> BTreeSet<String> {
    definition
        .units()
        .iter()
        .map(|unit| derive_identity(definition.id, unit.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::definition::{
        ClusterResources, DeploymentDefinition, PredictiveUnitDefinition, PredictorDefinition,
    };

    use super::{derive_identity, required_identities};

    fn definition_with_units(id: i64, unit_ids: &[i64]) -> DeploymentDefinition {
        DeploymentDefinition {
            id,
            predictor: PredictorDefinition {
                units: unit_ids
                    .iter()
                    .map(|unit_id| PredictiveUnitDefinition {
                        id: *unit_id,
                        name: format!("unit-{unit_id}"),
                        resource_spec: ClusterResources::new("seldonio/mock"),
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn identity_follows_naming_contract() {
        assert_eq!(derive_identity(42, 1), "sd-42-1");
        assert_eq!(derive_identity(7, 1234567890123), "sd-7-1234567890123");
        assert_eq!(derive_identity(-1, 2), "sd--1-2");
    }

    #[test]
    fn identity_is_deterministic() {
        assert_eq!(derive_identity(42, 3), derive_identity(42, 3));
    }

    #[test]
    fn distinct_pairs_yield_distinct_identities() {
        let range = -12..=12;
        let mut identities = HashSet::new();

        for deployment_id in range.clone() {
            for unit_id in range.clone() {
                assert!(identities.insert(derive_identity(deployment_id, unit_id)));
            }
        }

        assert_eq!(identities.len(), 25 * 25);
    }

    #[test]
    fn required_set_has_one_identity_per_unit() {
        let definition = definition_with_units(42, &[1, 2, 3, 10, 11]);
        let required = required_identities(&definition);

        assert_eq!(required.len(), 5);
        assert!(required.contains("sd-42-10"));
    }

    #[test]
    fn required_set_of_empty_predictor_is_empty() {
        assert!(required_identities(&definition_with_units(42, &[])).is_empty());
    }
}
