//! Host-side registries: device handles and controller factories

pub mod controllers;
pub mod devices;

pub use controllers::*;
pub use devices::*;
