//! Tunable parameters of the diffusion controller

use serde::{Deserialize, Serialize};

use crate::common::{ControllerError, ControllerResult};

/// Parameters for the diffusion (obstacle avoidance) controller.
///
/// Set once from the controller's configuration node. Values are not
/// range-checked on load; call [`DiffusionParams::validate`] for a strict check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionParams {
    /// Go-straight angle threshold [deg]
    #[serde(rename = "angle_threshold", alias = "alpha")]
    pub alpha: f64,
    /// Minimum resultant obstacle magnitude that triggers a turn
    pub delta: f64,
    /// Base wheel speed
    pub velocity: f64,
}

impl Default for DiffusionParams {
    fn default() -> Self {
        Self {
            alpha: 10.0,
            delta: 0.5,
            velocity: 2.5,
        }
    }
}

impl DiffusionParams {
    pub fn new(alpha: f64, delta: f64, velocity: f64) -> Self {
        Self { alpha, delta, velocity }
    }

    /// Parse from a configuration node; absent keys keep their defaults
    pub fn from_node(node: &toml::Table) -> ControllerResult<Self> {
        Ok(toml::Value::Table(node.clone()).try_into()?)
    }

    pub fn from_toml_str(s: &str) -> ControllerResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Strict check: all values finite, `delta` and `velocity` non-negative
    pub fn validate(&self) -> ControllerResult<()> {
        for (name, value) in [("angle_threshold", self.alpha), ("delta", self.delta), ("velocity", self.velocity)] {
            if !value.is_finite() {
                return Err(ControllerError::InvalidParameter(format!("{} must be finite, got {}", name, value)));
            }
        }
        if self.delta < 0.0 {
            return Err(ControllerError::InvalidParameter(format!("delta must be >= 0, got {}", self.delta)));
        }
        if self.velocity < 0.0 {
            return Err(ControllerError::InvalidParameter(format!("velocity must be >= 0, got {}", self.velocity)));
        }
        Ok(())
    }
}
