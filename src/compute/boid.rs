//! Boid state and random placement.

use rand::Rng;

use crate::schema::SimulationConfig;

use super::geometry::Vec2;

/// One flocking agent.
///
/// `cohesion_distance` and `alignment_angle` are the evolved traits: the
/// first bounds the neighbor-sensing radius for the cohesion and alignment
/// rules, the second is a heading bias rewritten by mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub cohesion_distance: f32,
    pub alignment_angle: f32,
}

impl Boid {
    /// Place a boid uniformly on the canvas with a small random velocity
    /// and a cohesion distance drawn from the configured bounds.
    pub fn spawn<R: Rng>(rng: &mut R, config: &SimulationConfig) -> Self {
        let vel = Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        Self {
            pos: Vec2::new(
                rng.gen_range(0.0..config.width),
                rng.gen_range(0.0..config.height),
            ),
            vel,
            cohesion_distance: rng
                .gen_range(config.min_cohesion_distance..=config.max_cohesion_distance),
            alignment_angle: vel.heading(),
        }
    }

    /// Current travel direction in radians.
    #[inline]
    pub fn heading(&self) -> f32 {
        self.vel.heading()
    }

    /// Current speed in units per tick.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
