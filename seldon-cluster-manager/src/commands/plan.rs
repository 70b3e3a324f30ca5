use anyhow::Context;
use seldon_cluster_manager_core::{kubernetes::Connector, manager::ClusterManager};

use crate::cli::DefinitionArgs;

use super::load_definition;

pub async fn plan<K: Connector>(
    args: DefinitionArgs,
    manager: &ClusterManager<K>,
) -> anyhow::Result<()> {
    let definition = load_definition(&args.file)?;
    let plan = manager
        .plan(&definition)
        .await
        .with_context(|| format!("Couldn't plan Seldon deployment {}!", definition.id))?;

    println!("{:<8} IDENTITY", "ACTION");

    for identity in plan.deleted_identities() {
        println!("{:<8} {identity}", "delete");
    }

    for identity in plan.updated_identities() {
        println!("{:<8} {identity}", "update");
    }

    for identity in plan.created_identities() {
        println!("{:<8} {identity}", "create");
    }

    if !plan.changes_membership() {
        println!("(no workloads will be added or removed)");
    }

    Ok(())
}
