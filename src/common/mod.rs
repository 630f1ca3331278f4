//! Common types, traits, and error definitions for footbot_diffusion
//!
//! This module provides the foundational building blocks shared by the
//! controller, the registries and the simulation test bench.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
