use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, GlobalArgs, LogLevel};
use commands::{create::create, delete::delete, plan::plan, probe::probe, update::update};
use env_logger::Target;
use seldon_cluster_manager_core::manager::ClusterManager;

mod cli;
mod commands;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    configure_logging(&cli.global_args);

    let config = cli.global_args.get_manager_config()?;
    let mut manager = ClusterManager::from_config(config);

    let namespaces = manager
        .init()
        .await
        .context("Couldn't initialize the cluster manager!")?;

    let result = match cli.command {
        Commands::Probe => probe(namespaces),
        Commands::Create(args) => create(args, &manager).await,
        Commands::Update(args) => update(args, &manager).await,
        Commands::Delete(args) => delete(args, &manager).await,
        Commands::Plan(args) => plan(args, &manager).await,
    };

    manager.cleanup();

    result
}

fn configure_logging(global_args: &GlobalArgs) {
    let log_level = global_args.get_log_level();
    let mut logger = env_logger::builder();

    logger
        .format_timestamp(None)
        .format_module_path(matches!(log_level, LogLevel::Trace))
        .format_target(false)
        .format_level(log_level.shows_level())
        .target(Target::Stderr);

    let (module, level) = log_level.get_filter();

    logger.filter(module, level).init();
}
