use crate::generator::scenario::ScenarioConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub scenario: ScenarioConfig,
    pub threshold_k: f32,
    pub propagation_speed: f32,
    pub round_trip: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            scenario: ScenarioConfig::default(),
            threshold_k: 5.0,
            propagation_speed: 330.0,
            round_trip: true,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(threshold_k: f32, propagation_speed: f32, seed: u64) -> Self {
        Self {
            scenario: ScenarioConfig {
                seed,
                ..Default::default()
            },
            threshold_k,
            propagation_speed,
            round_trip: true,
        }
    }
}
