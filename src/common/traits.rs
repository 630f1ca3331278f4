//! Common traits defining the controller/host seams

use crate::common::error::ControllerResult;
use crate::common::types::*;
use crate::registry::DeviceRegistry;

/// Read side of a proximity sensor ring
pub trait ProximitySensor: Send + Sync {
    /// Snapshot of the readings for the current cycle
    fn readings(&self) -> Vec<ProximityReading>;
}

/// Write side of a differential steering actuator
pub trait DifferentialSteeringActuator: Send + Sync {
    /// Set the linear speed of the left and right wheels
    fn set_linear_velocity(&self, left: f64, right: f64);

    /// Send a whole command as one `set_linear_velocity` call
    fn apply(&self, command: WheelCommand) {
        self.set_linear_velocity(command.left, command.right);
    }
}

/// Trait for robot controllers driven by an external scheduler.
///
/// The host calls `init` once with the controller's configuration node
/// and the devices it owns, then `control_step` once per cycle.
pub trait RobotController: Send {
    /// Obtain device handles and parse parameters
    fn init(&mut self, node: &toml::Table, devices: &DeviceRegistry) -> ControllerResult<()>;

    /// Run one control cycle
    fn control_step(&mut self) -> ControllerResult<()>;

    /// Bring the controller back to its just-initialized state
    fn reset(&mut self) {}

    /// Release device handles
    fn destroy(&mut self) {}
}
