//! Read-only flock statistics and navigation-convergence tracking.
//!
//! Nothing in this module mutates the flock; observers run alongside the
//! evolution step and feed logging and snapshots.

use serde::{Deserialize, Serialize};

use super::boid::Boid;
use super::evolution::mean_neighbor_heading;
use super::geometry::{Vec2, distance, distance_squared};

/// Metrics snapshot produced every evolution interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Mean pairwise distance over all boid pairs with nonzero distance.
    pub average_flock_cohesion: f32,
    /// Mean absolute deviation of each boid's heading from its neighbors'
    /// mean heading.
    pub alignment_angle_deviation: f32,
    /// Ticks since the flock centroid last converged on the navigation
    /// target, or None if it never has.
    pub navigation_ticks: Option<u64>,
}

/// Mean pairwise distance across the flock. Zero-distance pairs are
/// skipped; fewer than two boids yields 0.0.
pub fn average_flock_cohesion(boids: &[Boid]) -> f32 {
    let mut total = 0.0;
    let mut pairs = 0u32;

    for i in 0..boids.len() {
        for j in (i + 1)..boids.len() {
            let dist = distance(boids[i].pos, boids[j].pos);
            if dist != 0.0 {
                total += dist;
                pairs += 1;
            }
        }
    }

    if pairs == 0 { 0.0 } else { total / pairs as f32 }
}

/// Mean of `|own heading - mean neighbor heading|` over boids with at
/// least one neighbor within `visual_range`; 0.0 if no boid has neighbors.
pub fn alignment_angle_deviation(boids: &[Boid], visual_range: f32) -> f32 {
    let mut total = 0.0;
    let mut counted = 0u32;

    for i in 0..boids.len() {
        if let Some(mean_heading) = mean_neighbor_heading(boids, i, visual_range) {
            total += (boids[i].heading() - mean_heading).abs();
            counted += 1;
        }
    }

    if counted == 0 { 0.0 } else { total / counted as f32 }
}

/// Tracks how recently the flock centroid converged on a fixed target
/// point (the canvas center at startup).
#[derive(Debug, Clone)]
pub struct NavigationTracker {
    target: Vec2,
    /// Squared-distance convergence threshold.
    threshold: f32,
    reset_tick: Option<u64>,
}

impl NavigationTracker {
    pub fn new(target: Vec2, threshold: f32) -> Self {
        Self {
            target,
            threshold,
            reset_tick: None,
        }
    }

    /// Check convergence for the current tick, resetting the timer when
    /// the centroid is within the threshold of the target.
    pub fn observe(&mut self, boids: &[Boid], tick: u64) {
        if boids.is_empty() {
            return;
        }

        let mut centroid = Vec2::ZERO;
        for boid in boids {
            centroid += boid.pos;
        }
        let centroid = centroid * (1.0 / boids.len() as f32);

        if distance_squared(centroid, self.target) < self.threshold {
            self.reset_tick = Some(tick);
        }
    }

    /// Ticks elapsed since the last convergence, or None if the flock has
    /// never converged.
    pub fn navigation_time(&self, current_tick: u64) -> Option<u64> {
        self.reset_tick.map(|tick| current_tick - tick)
    }
}
