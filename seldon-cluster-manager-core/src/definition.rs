use std::{
    collections::{BTreeMap, HashSet},
    fs::read_to_string,
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;

pub type DeploymentId = i64;
pub type PredictiveUnitId = i64;

const DEFAULT_REPLICAS: i32 = 1;
const DEFAULT_CONTAINER_PORT: i32 = 9000;

/// Desired state of a single predictive-serving pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentDefinition {
    pub id: DeploymentId,
    pub predictor: PredictorDefinition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictorDefinition {
    /// Create and update calls are issued in this order.
    #[serde(rename = "predictiveUnits", alias = "units", default)]
    pub units: Vec<PredictiveUnitDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveUnitDefinition {
    pub id: PredictiveUnitId,
    pub name: String,
    #[serde(rename = "clusterResources", alias = "resourceSpec")]
    pub resource_spec: ClusterResources,
}

/// Cluster resources requested by a predictive unit. The reconciler never looks
/// inside, only the workload builder does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResources {
    pub image: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_replicas")]
    pub replicas: i32,
    #[serde(default = "default_container_port")]
    pub container_port: i32,
    #[serde(default)]
    pub cpu: Option<String>,
    #[serde(default)]
    pub memory: Option<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

fn default_version() -> String {
    "latest".to_owned()
}

fn default_replicas() -> i32 {
    DEFAULT_REPLICAS
}

fn default_container_port() -> i32 {
    DEFAULT_CONTAINER_PORT
}

impl ClusterResources {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            version: default_version(),
            replicas: DEFAULT_REPLICAS,
            container_port: DEFAULT_CONTAINER_PORT,
            cpu: None,
            memory: None,
            env: BTreeMap::new(),
        }
    }

    pub fn image_reference(&self) -> String {
        format!("{}:{}", self.image, self.version)
    }
}

impl DeploymentDefinition {
    pub fn units(&self) -> &[PredictiveUnitDefinition] {
        &self.predictor.units
    }

    /// Rejects definitions in which two units would resolve to the same workload.
    pub fn validated(self) -> Result<Self, DefinitionError> {
        let mut seen = HashSet::with_capacity(self.predictor.units.len());

        for unit in &self.predictor.units {
            if !seen.insert(unit.id) {
                return Err(DefinitionError::DuplicateUnitId {
                    deployment_id: self.id,
                    unit_id: unit.id,
                });
            }
        }

        Ok(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(raw).map_err(|e| DefinitionError::Parse(e.to_string()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self, DefinitionError> {
        serde_yaml::from_str(raw).map_err(|e| DefinitionError::Parse(e.to_string()))
    }

    /// Loads a definition, `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let raw = read_to_string(path).map_err(DefinitionError::Io)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&raw),
            _ => Self::from_yaml(&raw),
        }
    }
}
