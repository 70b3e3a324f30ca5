use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use seldon_cluster_manager_core::{
    definition::DeploymentId,
    manager::config::{ManagerConfig, ManagerConfigBuilder},
    DEFAULT_MASTER_URL, DEFAULT_NAMESPACE,
};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// kubernetes namespace holding the managed workloads
    #[arg(short = 'n', long, global = true, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
    /// connect directly to this API server URL, a bare flag targets a local kubectl proxy
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_MASTER_URL,
        conflicts_with_all = ["kube_config", "kube_context"]
    )]
    pub master_url: Option<String>,
    /// override default kubeconfig
    #[arg(long, global = true)]
    pub kube_config: Option<String>,
    /// override default kubeconfig context
    #[arg(long, global = true)]
    pub kube_context: Option<String>,
    /// enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose_logging: bool,
    /// enable trace output (more detailed than verbose, overrides it if present)
    #[arg(long = "trace", global = true)]
    pub trace_logging: bool,
}

impl GlobalArgs {
    pub fn get_log_level(&self) -> LogLevel {
        if self.trace_logging {
            return LogLevel::Trace;
        }

        if self.verbose_logging {
            return LogLevel::Verbose;
        }

        LogLevel::Normal
    }

    pub fn get_manager_config(&self) -> anyhow::Result<ManagerConfig> {
        Ok(ManagerConfigBuilder::default()
            .namespace(self.namespace.to_owned())
            .master_url(self.master_url.to_owned())
            .kube_config(self.kube_config.to_owned())
            .kube_context(self.kube_context.to_owned())
            .build()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Normal,
    Verbose,
    Trace,
}

impl LogLevel {
    /// Module filter passed to the logger, `None` means every module.
    pub fn get_filter(&self) -> (Option<&'static str>, LevelFilter) {
        match self {
            LogLevel::Normal => (Some("seldon_cluster_manager"), LevelFilter::Info),
            LogLevel::Verbose => (Some("seldon_cluster_manager"), LevelFilter::Debug),
            LogLevel::Trace => (None, LevelFilter::Debug),
        }
    }

    /// Level tags are shown whenever more than plain progress output is requested.
    pub fn shows_level(&self) -> bool {
        !matches!(self, LogLevel::Normal)
    }
}

#[derive(Debug, Subcommand)]
#[command(arg_required_else_help = true)]
pub enum Commands {
    /// check connectivity with the cluster
    Probe,
    /// create workloads and services for every predictive unit of a new deployment
    #[command(alias = "c")]
    Create(DefinitionArgs),
    /// reconcile an existing deployment with its definition
    #[command(alias = "u")]
    Update(DefinitionArgs),
    /// remove every workload and service of a deployment
    #[command(alias = "d")]
    Delete(DeleteArgs),
    /// show what an update would delete, update and create
    #[command(alias = "p")]
    Plan(DefinitionArgs),
}

#[derive(Debug, Args)]
pub struct DefinitionArgs {
    /// deployment definition file (.json or .yaml)
    #[arg(short = 'f', long)]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// id of the deployment to remove
    #[arg(long, allow_negative_numbers = true)]
    pub id: DeploymentId,
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Parser};
    use log::LevelFilter;
    use seldon_cluster_manager_core::DEFAULT_MASTER_URL;

    use super::{Cli, Commands, LogLevel};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let argv = std::iter::once("seldon-cluster-manager").chain(args.iter().copied());

        Cli::try_parse_from(argv)
    }

    #[test]
    fn bare_master_url_targets_local_proxy() {
        let cli = parse(&["probe", "--master-url"]).unwrap();
        let config = cli.global_args.get_manager_config().unwrap();

        assert_eq!(config.master_url.as_deref(), Some(DEFAULT_MASTER_URL));
    }

    #[test]
    fn explicit_master_url_is_kept() {
        let cli = parse(&["--master-url=https://10.0.0.1:6443", "probe"]).unwrap();

        assert_eq!(
            cli.global_args.master_url.as_deref(),
            Some("https://10.0.0.1:6443")
        );
    }

    #[test]
    fn master_url_conflicts_with_kubeconfig_flags() {
        let with_context = parse(&["probe", "--master-url", "--kube-context", "minikube"]);
        let with_config = parse(&["probe", "--master-url", "--kube-config", "/tmp/config"]);

        assert_eq!(with_context.unwrap_err().kind(), ErrorKind::ArgumentConflict);
        assert_eq!(with_config.unwrap_err().kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn kube_context_without_master_url_is_accepted() {
        let cli = parse(&["-n", "seldon", "probe", "--kube-context", "minikube"]).unwrap();
        let config = cli.global_args.get_manager_config().unwrap();

        assert!(matches!(cli.command, Commands::Probe));
        assert_eq!(config.namespace, "seldon");
        assert_eq!(config.kube_context.as_deref(), Some("minikube"));
        assert!(config.master_url.is_none());
    }

    #[test]
    fn delete_accepts_negative_ids() {
        let cli = parse(&["delete", "--id", "-7"]).unwrap();

        assert!(matches!(cli.command, Commands::Delete(args) if args.id == -7));
    }

    #[test]
    fn trace_overrides_verbose() {
        let cli = parse(&["-v", "--trace", "probe"]).unwrap();

        assert_eq!(cli.global_args.get_log_level(), LogLevel::Trace);
    }

    #[test]
    fn log_filters_follow_level() {
        assert_eq!(
            LogLevel::Normal.get_filter(),
            (Some("seldon_cluster_manager"), LevelFilter::Info)
        );
        assert_eq!(
            LogLevel::Verbose.get_filter(),
            (Some("seldon_cluster_manager"), LevelFilter::Debug)
        );
        assert_eq!(LogLevel::Trace.get_filter(), (None, LevelFilter::Debug));
        assert!(!LogLevel::Normal.shows_level());
        assert!(LogLevel::Trace.shows_level());
    }
}
