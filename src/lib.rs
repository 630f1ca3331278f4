//! footbot_diffusion - reactive obstacle avoidance for a differential drive robot
//!
//! A ring of proximity readings is folded into one obstacle vector each
//! control cycle, and the vector picks the left/right wheel speeds. The
//! crate also carries the host side needed to run it: device and
//! controller registries, a kinematic simulation and plotting.

// Core modules
pub mod common;
pub mod utils;

// Controller and host modules
pub mod control;
pub mod registry;
pub mod simulation;

// Re-export common types for convenience
pub use common::{Point2D, Pose2D, ProximityReading, ObstacleVector, WheelCommand};
pub use common::{ProximitySensor, DifferentialSteeringActuator, RobotController};
pub use common::{ControllerError, ControllerResult};
pub use control::{FootBotDiffusion, DiffusionParams};
pub use registry::{ControllerRegistry, DeviceRegistry, DIFFUSION_CONTROLLER_NAME};
