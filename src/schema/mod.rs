//! Schema module - Configuration types for the flocking simulation.

mod config;
mod evolution;

pub use config::*;
pub use evolution::*;
