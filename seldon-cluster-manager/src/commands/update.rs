use anyhow::Context;
use log::info;
use seldon_cluster_manager_core::{kubernetes::Connector, manager::ClusterManager};

use crate::cli::DefinitionArgs;

use super::load_definition;

pub async fn update<K: Connector>(
    args: DefinitionArgs,
    manager: &ClusterManager<K>,
) -> anyhow::Result<()> {
    let definition = load_definition(&args.file)?;
    let summary = manager
        .apply_update(&definition)
        .await
        .with_context(|| format!("Couldn't update Seldon deployment {}!", definition.id))?;

    info!("Seldon deployment {} updated ({summary})", definition.id);

    Ok(())
}
