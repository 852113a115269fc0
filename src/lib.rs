//! Evolving boids - a 2D flocking simulation with a genetic adaptation
//! layer.
//!
//! Boids steer by the classic cohesion/separation/alignment rules, dodge
//! obstacles and a chasing predator, and feel a shared wind. On a fixed
//! tick interval a genetic layer ranks the flock by an emergent fitness
//! signal and rewrites each boid's evolved traits (cohesion distance and
//! alignment angle).
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration types and validation
//! - `compute`: The simulation core (geometry, flock rules, environment,
//!   evolution, metrics, frame driver)
//!
//! Rendering is not part of the core: an external driver calls [`Simulation::tick`]
//! once per frame and draws from [`Simulation::snapshot`].
//!
//! # Example
//!
//! ```rust,no_run
//! use flocksim::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     num_boids: 100,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut sim = Simulation::new(config).expect("valid configuration");
//! for _ in 0..500 {
//!     if let Some(record) = sim.tick().generation {
//!         println!(
//!             "generation {}: best fitness {}",
//!             record.generation_count, record.best_fitness
//!         );
//!     }
//! }
//!
//! let snapshot = sim.snapshot();
//! println!("{} boids after {} ticks", snapshot.boids.len(), snapshot.tick);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{Simulation, SimulationSnapshot, TickOutcome, Vec2};
pub use schema::{EvolutionStrategy, GenerationRecord, SimulationConfig};
