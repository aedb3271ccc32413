/*
 * Run Configuration
 *
 * The JSON document accepted by `--config`: the rule parameters plus the
 * spawn settings. Missing sections and fields fall back to their defaults.
 */

use serde::{Deserialize, Serialize};

use crate::params::SimulationParams;
use crate::spawn::SpawnConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub params: SimulationParams,
    pub spawn: SpawnConfig,
}

impl RunConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
