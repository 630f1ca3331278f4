//! Experiment configuration loaded from TOML

use std::{env, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::common::{ControllerResult, Pose2D};
use crate::registry::DIFFUSION_CONTROLLER_NAME;
use crate::simulation::arena::ArenaConfig;
use crate::simulation::devices::ProximityRingConfig;

/// Used when `CONFIG_PATH` is not set
pub const DEFAULT_CONFIG_PATH: &str = "./config/footbot_diffusion.toml";

/// Which controller to run and the node handed to its `init`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSection {
    pub name: String,
    pub params: toml::Table,
}

impl Default for ControllerSection {
    fn default() -> Self {
        Self {
            name: DIFFUSION_CONTROLLER_NAME.to_string(),
            params: toml::Table::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of control cycles
    pub steps: usize,
    /// Control period [s]
    pub dt: f64,
    /// Seed for arena generation and sensor noise
    pub seed: u64,
    /// Start pose as `[x, y, yaw]`
    pub start: [f64; 3],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 3000,
            dt: 0.1,
            seed: 42,
            start: [0.0, 0.0, 0.0],
        }
    }
}

impl SimulationConfig {
    pub fn start_pose(&self) -> Pose2D {
        Pose2D::new(self.start[0], self.start[1], self.start[2])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub controller: ControllerSection,
    pub simulation: SimulationConfig,
    pub arena: ArenaConfig,
    pub sensor: ProximityRingConfig,
}

impl ExperimentConfig {
    /// Load from `$CONFIG_PATH`, falling back to [`DEFAULT_CONFIG_PATH`]
    pub fn load() -> ControllerResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file(config_path)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ControllerResult<Self> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(s: &str) -> ControllerResult<Self> {
        Ok(toml::from_str(s)?)
    }
}
