//! Frame driver: owns all simulation state and advances it one tick at a
//! time.
//!
//! A `Simulation` is the single mutable-state owner. `tick` runs to
//! completion before the next call; predator placement applies between
//! ticks only (enforced by `&mut` exclusivity). Multiple independent
//! simulations can coexist, each with its own injected RNG.

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::schema::{ConfigError, GenerationRecord, SimulationConfig};

use super::boid::Boid;
use super::environment::{Environment, Obstacle, Predator};
use super::evolution::{FitnessState, evolve};
use super::flock;
use super::geometry::Vec2;
use super::metrics::{
    MetricsRecord, NavigationTracker, alignment_angle_deviation, average_flock_cohesion,
};

/// Scale applied to the cohesion metric when logged (original reporting
/// units).
const UNIT_FACTOR: f32 = 0.001;

/// The owned simulation state and frame driver.
pub struct Simulation {
    config: SimulationConfig,
    boids: Vec<Boid>,
    env: Environment,
    fitness: FitnessState,
    nav: NavigationTracker,
    tick: u64,
    rng: StdRng,
    last_metrics: Option<MetricsRecord>,
    last_generation: Option<GenerationRecord>,
}

/// What a single tick produced. The records are Some only on evolution
/// interval boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Tick index just completed (first tick is 1).
    pub tick: u64,
    pub metrics: Option<MetricsRecord>,
    pub generation: Option<GenerationRecord>,
}

/// Read-only copy of the visible simulation state, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub tick: u64,
    pub boids: Vec<BoidSnapshot>,
    pub obstacles: Vec<Obstacle>,
    pub predator: Option<Predator>,
    pub wind: Vec2,
    pub last_metrics: Option<MetricsRecord>,
    pub last_generation: Option<GenerationRecord>,
}

/// One boid as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoidSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub heading: f32,
    pub cohesion_distance: f32,
}

impl Simulation {
    /// Validate the configuration and seed the flock and environment.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let boids = (0..config.num_boids)
            .map(|_| Boid::spawn(&mut rng, &config))
            .collect();
        let env = Environment::generate(&mut rng, &config);
        let target = Vec2::new(config.width / 2.0, config.height / 2.0);
        let nav = NavigationTracker::new(target, config.convergence_threshold);

        Ok(Self {
            config,
            boids,
            env,
            fitness: FitnessState::default(),
            nav,
            tick: 0,
            rng,
            last_metrics: None,
            last_generation: None,
        })
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        self.env.update_predator(&self.boids);

        let forces = self.config.forces.clone();
        for i in 0..self.boids.len() {
            flock::fly_towards_center(&mut self.boids, i, forces.centering_factor);
            flock::avoid_others(&mut self.boids, i, forces.min_distance, forces.avoid_factor);
            self.env
                .avoid_obstacles(&mut self.boids[i], forces.avoid_factor);
            flock::match_velocity(&mut self.boids, i, forces.matching_factor);
            flock::limit_speed(&mut self.boids[i], self.config.speed_limit);
            flock::keep_within_bounds(
                &mut self.boids[i],
                self.config.width,
                self.config.height,
                &forces,
            );
            self.boids[i].vel += self.env.wind;
            flock::integrate(&mut self.boids[i]);
        }

        self.tick += 1;
        self.nav.observe(&self.boids, self.tick);

        let mut outcome = TickOutcome {
            tick: self.tick,
            metrics: None,
            generation: None,
        };

        if self.tick % self.config.evolution.interval == 0 {
            let metrics = self.collect_metrics();
            info!(
                "tick {}: avg cohesion {:.6}, alignment dev {:.4}",
                self.tick,
                metrics.average_flock_cohesion * UNIT_FACTOR,
                metrics.alignment_angle_deviation,
            );
            let generation = evolve(
                &mut self.boids,
                &mut self.fitness,
                &self.config,
                &mut self.rng,
            );
            self.last_metrics = Some(metrics);
            self.last_generation = Some(generation);
            outcome.metrics = Some(metrics);
            outcome.generation = Some(generation);
        }

        if self.config.wind.variable && self.tick % self.config.wind.update_interval == 0 {
            self.env.update_wind_pattern(&mut self.rng);
        }

        outcome
    }

    /// Place (or move) the predator. Applies between ticks.
    pub fn set_predator(&mut self, pos: Vec2, radius: f32) {
        self.env.predator = Some(Predator { pos, radius });
    }

    /// Remove the predator.
    pub fn clear_predator(&mut self) {
        self.env.predator = None;
    }

    /// Read-only copy of the visible state. Idempotent between ticks.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            tick: self.tick,
            boids: self
                .boids
                .iter()
                .map(|b| BoidSnapshot {
                    pos: b.pos,
                    vel: b.vel,
                    heading: b.heading(),
                    cohesion_distance: b.cohesion_distance,
                })
                .collect(),
            obstacles: self.env.obstacles.clone(),
            predator: self.env.predator,
            wind: self.env.wind,
            last_metrics: self.last_metrics,
            last_generation: self.last_generation,
        }
    }

    /// Ticks since the flock centroid last converged on the navigation
    /// target.
    pub fn navigation_time(&self) -> Option<u64> {
        self.nav.navigation_time(self.tick)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn collect_metrics(&self) -> MetricsRecord {
        MetricsRecord {
            average_flock_cohesion: average_flock_cohesion(&self.boids),
            alignment_angle_deviation: alignment_angle_deviation(
                &self.boids,
                self.config.visual_range,
            ),
            navigation_ticks: self.nav.navigation_time(self.tick),
        }
    }

    /// Replace the flock wholesale. Test hook for constructing exact
    /// scenarios.
    #[cfg(test)]
    fn set_boids(&mut self, boids: Vec<Boid>) {
        self.boids = boids;
    }

    /// Reseed the driver RNG. Test hook.
    #[cfg(test)]
    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
