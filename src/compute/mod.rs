//! Compute module - The simulation core.

mod boid;
mod engine;
mod environment;
mod flock;
mod geometry;
mod metrics;

pub mod evolution;

pub use boid::*;
pub use engine::*;
pub use environment::*;
pub use flock::*;
pub use geometry::*;
pub use metrics::*;
