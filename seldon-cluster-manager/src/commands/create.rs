use anyhow::Context;
use log::info;
use seldon_cluster_manager_core::{kubernetes::Connector, manager::ClusterManager};

use crate::cli::DefinitionArgs;

use super::load_definition;

pub async fn create<K: Connector>(
    args: DefinitionArgs,
    manager: &ClusterManager<K>,
) -> anyhow::Result<()> {
    let definition = load_definition(&args.file)?;
    let summary = manager
        .apply_create(&definition)
        .await
        .with_context(|| format!("Couldn't create Seldon deployment {}!", definition.id))?;

    info!("Seldon deployment {} created ({summary})", definition.id);

    Ok(())
}
