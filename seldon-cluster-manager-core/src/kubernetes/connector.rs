use async_trait::async_trait;

use crate::{error::InitializationError, manager::config::ManagerConfig};

use super::{cluster::KubeCluster, operations::create_client, Connector};

pub struct KubeConnector {
    config: ManagerConfig,
}

impl KubeConnector {
    pub fn new(config: ManagerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for KubeConnector {
    type Cluster = KubeCluster;

    async fn connect(&self) -> Result<KubeCluster, InitializationError> {
        let client = create_client(&self.config).await?;

        Ok(KubeCluster::new(client))
    }
}
