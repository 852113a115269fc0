//! Configuration types for the flocking simulation.

use serde::{Deserialize, Serialize};

use super::EvolutionSettings;

/// Top-level simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Canvas width in world units.
    pub width: f32,
    /// Canvas height in world units.
    pub height: f32,
    /// Number of boids in the flock.
    pub num_boids: usize,
    /// Number of obstacles scattered at initialization. 0 disables obstacles.
    #[serde(default = "default_num_obstacles")]
    pub num_obstacles: usize,
    /// Hard cap on boid speed per tick.
    #[serde(default = "default_speed_limit")]
    pub speed_limit: f32,
    /// Global radius for metric/fitness neighbor scans (distinct from the
    /// per-boid evolved cohesion distance).
    #[serde(default = "default_visual_range")]
    pub visual_range: f32,
    /// Lower bound for the evolved per-boid cohesion distance.
    #[serde(default = "default_min_cohesion_distance")]
    pub min_cohesion_distance: f32,
    /// Upper bound for the evolved per-boid cohesion distance.
    #[serde(default = "default_max_cohesion_distance")]
    pub max_cohesion_distance: f32,
    /// Steering rule coefficients.
    #[serde(default)]
    pub forces: ForceConfig,
    /// Wind forcing.
    #[serde(default)]
    pub wind: WindConfig,
    /// Genetic adaptation settings.
    #[serde(default)]
    pub evolution: EvolutionSettings,
    /// Squared-distance threshold for flock-centroid convergence on the
    /// navigation target (canvas center).
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f32,
    /// Seed for the simulation RNG. None draws from entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            num_boids: 100,
            num_obstacles: default_num_obstacles(),
            speed_limit: default_speed_limit(),
            visual_range: default_visual_range(),
            min_cohesion_distance: default_min_cohesion_distance(),
            max_cohesion_distance: default_max_cohesion_distance(),
            forces: ForceConfig::default(),
            wind: WindConfig::default(),
            evolution: EvolutionSettings::default(),
            convergence_threshold: default_convergence_threshold(),
            random_seed: None,
        }
    }
}

fn default_num_obstacles() -> usize {
    50
}
fn default_speed_limit() -> f32 {
    15.0
}
fn default_visual_range() -> f32 {
    100.0
}
fn default_min_cohesion_distance() -> f32 {
    50.0
}
fn default_max_cohesion_distance() -> f32 {
    100.0
}
fn default_convergence_threshold() -> f32 {
    60_000.0
}

/// Coefficients for the per-boid steering rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceConfig {
    /// Fraction of the offset to the neighbor centroid applied per tick.
    #[serde(default = "default_centering_factor")]
    pub centering_factor: f32,
    /// Strength of separation and obstacle repulsion.
    #[serde(default = "default_avoid_factor")]
    pub avoid_factor: f32,
    /// Fraction of the velocity gap to the neighbor average applied per tick.
    #[serde(default = "default_matching_factor")]
    pub matching_factor: f32,
    /// Separation radius: boids closer than this repel each other.
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    /// Distance from a canvas edge at which the bounds nudge kicks in.
    #[serde(default = "default_margin")]
    pub margin: f32,
    /// Constant velocity nudge per tick while inside the margin.
    #[serde(default = "default_turn_factor")]
    pub turn_factor: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            centering_factor: default_centering_factor(),
            avoid_factor: default_avoid_factor(),
            matching_factor: default_matching_factor(),
            min_distance: default_min_distance(),
            margin: default_margin(),
            turn_factor: default_turn_factor(),
        }
    }
}

fn default_centering_factor() -> f32 {
    0.005
}
fn default_avoid_factor() -> f32 {
    0.05
}
fn default_matching_factor() -> f32 {
    0.05
}
fn default_min_distance() -> f32 {
    25.0
}
fn default_margin() -> f32 {
    200.0
}
fn default_turn_factor() -> f32 {
    1.0
}

/// Wind forcing applied uniformly to every boid each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindConfig {
    /// Wind velocity (x, y). Zero disables the force.
    #[serde(default)]
    pub velocity: (f32, f32),
    /// When true the wind direction is re-drawn periodically while its
    /// magnitude is preserved.
    #[serde(default)]
    pub variable: bool,
    /// Ticks between wind-direction updates in variable mode.
    #[serde(default = "default_wind_update_interval")]
    pub update_interval: u64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            velocity: (0.0, 0.0),
            variable: false,
            update_interval: default_wind_update_interval(),
        }
    }
}

fn default_wind_update_interval() -> u64 {
    500
}

impl SimulationConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_boids == 0 {
            return Err(ConfigError::NoBoids);
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::InvalidCanvas);
        }
        if self.speed_limit <= 0.0 {
            return Err(ConfigError::InvalidSpeedLimit);
        }
        if self.min_cohesion_distance > self.max_cohesion_distance {
            return Err(ConfigError::InvalidCohesionBounds {
                min: self.min_cohesion_distance,
                max: self.max_cohesion_distance,
            });
        }
        if self.visual_range <= 0.0 {
            return Err(ConfigError::InvalidVisualRange);
        }
        if self.convergence_threshold < 0.0 {
            return Err(ConfigError::InvalidConvergenceThreshold);
        }
        self.evolution.validate(self.num_boids)?;
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Boid count must be non-zero")]
    NoBoids,
    #[error("Canvas dimensions must be positive")]
    InvalidCanvas,
    #[error("Speed limit must be positive")]
    InvalidSpeedLimit,
    #[error("Cohesion distance bounds inverted: min ({min}) > max ({max})")]
    InvalidCohesionBounds { min: f32, max: f32 },
    #[error("Visual range must be positive")]
    InvalidVisualRange,
    #[error("Convergence threshold must be non-negative")]
    InvalidConvergenceThreshold,
    #[error("Evolution interval must be non-zero")]
    InvalidEvolutionInterval,
    #[error("Mutation rate must be within [0, 1], got {0}")]
    InvalidMutationRate(f32),
    #[error("Fitness weights must be non-negative and sum to a positive value")]
    InvalidFitnessWeights,
    #[error("Elite count ({elites}) must be smaller than the flock size ({flock})")]
    InvalidEliteCount { elites: usize, flock: usize },
}
