use derive_builder::Builder;

use crate::DEFAULT_NAMESPACE;

/// Where the manager connects to and which namespace it manages.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ManagerConfig {
    #[builder(default = "DEFAULT_NAMESPACE.to_owned()")]
    pub namespace: String,
    /// API server URL, e.g. a `kubectl proxy` endpoint; takes precedence over kubeconfig.
    #[builder(default)]
    pub master_url: Option<String>,
    #[builder(default)]
    pub kube_config: Option<String>,
    #[builder(default)]
    pub kube_context: Option<String>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            master_url: None,
            kube_config: None,
            kube_context: None,
        }
    }
}
