//! Host-owned sensor and actuator handles, looked up by device name

use std::collections::HashMap;
use std::sync::Arc;

use crate::common::{ControllerError, ControllerResult, DifferentialSteeringActuator, ProximitySensor};

#[derive(Default)]
pub struct DeviceRegistry {
    sensors: HashMap<String, Arc<dyn ProximitySensor>>,
    actuators: HashMap<String, Arc<dyn DifferentialSteeringActuator>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sensor; replaces any sensor already under that name
    pub fn add_sensor(&mut self, name: &str, sensor: Arc<dyn ProximitySensor>) {
        self.sensors.insert(name.to_string(), sensor);
    }

    /// Register an actuator; replaces any actuator already under that name
    pub fn add_actuator(&mut self, name: &str, actuator: Arc<dyn DifferentialSteeringActuator>) {
        self.actuators.insert(name.to_string(), actuator);
    }

    pub fn sensor(&self, name: &str) -> ControllerResult<Arc<dyn ProximitySensor>> {
        self.sensors
            .get(name)
            .cloned()
            .ok_or_else(|| ControllerError::MissingDevice(name.to_string()))
    }

    pub fn actuator(&self, name: &str) -> ControllerResult<Arc<dyn DifferentialSteeringActuator>> {
        self.actuators
            .get(name)
            .cloned()
            .ok_or_else(|| ControllerError::MissingDevice(name.to_string()))
    }
}
