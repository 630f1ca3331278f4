//! Control algorithms module
//!
//! Includes the diffusion obstacle avoidance controller, its parameters
//! and the proximity diagnostics it logs.

pub mod diagnostics;
pub mod diffusion;
pub mod params;

pub use diagnostics::{Encounter, closest_reading};
pub use diffusion::{FootBotDiffusion, expo_scale, obstacle_vector, turn_factor, PROXIMITY_DEVICE, WHEELS_DEVICE};
pub use params::DiffusionParams;
