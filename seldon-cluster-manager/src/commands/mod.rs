use std::path::Path;

use anyhow::Context;
use log::debug;
use seldon_cluster_manager_core::definition::DeploymentDefinition;

pub mod create;
pub mod delete;
pub mod plan;
pub mod probe;
pub mod update;

fn load_definition(path: &Path) -> anyhow::Result<DeploymentDefinition> {
    let definition = DeploymentDefinition::load(path)
        .and_then(DeploymentDefinition::validated)
        .with_context(|| format!("Couldn't load deployment definition from '{}'!", path.display()))?;

    debug!("{definition:#?}");

    Ok(definition)
}
