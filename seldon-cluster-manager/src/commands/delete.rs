use anyhow::Context;
use log::info;
use seldon_cluster_manager_core::{kubernetes::Connector, manager::ClusterManager};

use crate::cli::DeleteArgs;

pub async fn delete<K: Connector>(
    args: DeleteArgs,
    manager: &ClusterManager<K>,
) -> anyhow::Result<()> {
    let summary = manager
        .apply_delete(args.id)
        .await
        .with_context(|| format!("Couldn't delete Seldon deployment {}!", args.id))?;

    if summary.deleted.is_empty() {
        info!("Couldn't find any workloads of Seldon deployment {}!", args.id);
    } else {
        info!("Seldon deployment {} deleted ({summary})", args.id);
    }

    Ok(())
}
