//! Obstacles, predator pursuit and wind forcing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::schema::SimulationConfig;

use super::boid::Boid;
use super::geometry::{Vec2, distance};

/// Extra clearance beyond an obstacle's radius at which repulsion starts.
const OBSTACLE_CLEARANCE: f32 = 30.0;
/// Extra clearance beyond the predator's radius; larger so boids flee early.
const PREDATOR_CLEARANCE: f32 = 50.0;
/// Predator advance per tick while chasing.
const PREDATOR_SPEED: f32 = 2.0;

/// A circular static obstacle. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub radius: f32,
}

/// The chasing predator. At most one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Predator {
    pub pos: Vec2,
    pub radius: f32,
}

/// Obstacle set, optional predator and the shared wind vector.
#[derive(Debug, Clone)]
pub struct Environment {
    pub obstacles: Vec<Obstacle>,
    pub predator: Option<Predator>,
    pub wind: Vec2,
}

impl Environment {
    /// Scatter `num_obstacles` circles over the canvas with radii in
    /// `[10, 35)` and take the wind vector from the configuration.
    pub fn generate<R: Rng>(rng: &mut R, config: &SimulationConfig) -> Self {
        let obstacles = (0..config.num_obstacles)
            .map(|_| Obstacle {
                pos: Vec2::new(
                    rng.gen_range(0.0..config.width),
                    rng.gen_range(0.0..config.height),
                ),
                radius: rng.gen_range(10.0..35.0),
            })
            .collect();

        Self {
            obstacles,
            predator: None,
            wind: Vec2::new(config.wind.velocity.0, config.wind.velocity.1),
        }
    }

    /// Steer a boid away from every obstacle it is too close to, and away
    /// from the predator at double strength.
    pub fn avoid_obstacles(&self, boid: &mut Boid, avoid_factor: f32) {
        for obstacle in &self.obstacles {
            if distance(boid.pos, obstacle.pos) < obstacle.radius + OBSTACLE_CLEARANCE {
                boid.vel += (boid.pos - obstacle.pos) * avoid_factor;
            }
        }

        if let Some(predator) = &self.predator
            && distance(boid.pos, predator.pos) < predator.radius + PREDATOR_CLEARANCE
        {
            boid.vel += (boid.pos - predator.pos) * (avoid_factor * 2.0);
        }
    }

    /// Advance the predator toward the nearest boid (ties broken by flock
    /// order). A predator sitting exactly on its target stays put for the
    /// tick.
    pub fn update_predator(&mut self, boids: &[Boid]) {
        let Some(predator) = &mut self.predator else {
            return;
        };

        let mut target = None;
        let mut nearest = f32::INFINITY;
        for boid in boids {
            let dist = distance(predator.pos, boid.pos);
            if dist < nearest {
                nearest = dist;
                target = Some(boid.pos);
            }
        }
        let Some(target) = target else {
            return;
        };

        let offset = target - predator.pos;
        let magnitude = offset.length();
        if magnitude > 0.0 {
            predator.pos += offset * (PREDATOR_SPEED / magnitude);
        }
    }

    /// Re-draw the wind direction uniformly in `[0, 2pi)` while keeping
    /// its magnitude.
    pub fn update_wind_pattern<R: Rng>(&mut self, rng: &mut R) {
        let magnitude = self.wind.length();
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        self.wind = Vec2::from_angle(angle) * magnitude;
    }
}
