//! Utility modules for footbot_diffusion

pub mod logger;
pub mod visualization;

pub use visualization::{Visualizer, colors};
