//! Per-boid steering rules.
//!
//! Each tick the rules run in a fixed order for each boid, all mutating the
//! same velocity before the position is integrated: cohesion, separation,
//! obstacle/predator avoidance, alignment, speed limit, bounds, wind.
//!
//! Boids are updated in place in flock order, so a boid's neighbor scans see
//! flock-mates earlier in the list already updated for the current tick.
//! The scans are O(n) per boid over the whole flock; with ~100 boids this
//! is intentional, and a spatial index would change the emergent behavior.
//!
//! The cohesion and alignment scans do not exclude the boid itself: a boid
//! inside its own cohesion distance (always) counts toward the centroid and
//! average velocity it steers to.

use crate::schema::ForceConfig;

use super::boid::Boid;
use super::geometry::{Vec2, distance};

/// Cohesion: steer toward the centroid of boids within this boid's own
/// cohesion distance. No-op with zero neighbors.
pub fn fly_towards_center(boids: &mut [Boid], i: usize, centering_factor: f32) {
    let this = &boids[i];
    let mut center = Vec2::ZERO;
    let mut neighbors = 0u32;

    for other in boids.iter() {
        if distance(this.pos, other.pos) < this.cohesion_distance {
            center += other.pos;
            neighbors += 1;
        }
    }

    if neighbors > 0 {
        let center = center * (1.0 / neighbors as f32);
        let delta = (center - boids[i].pos) * centering_factor;
        boids[i].vel += delta;
    }
}

/// Separation: push away from every other boid closer than `min_distance`.
pub fn avoid_others(boids: &mut [Boid], i: usize, min_distance: f32, avoid_factor: f32) {
    let this = &boids[i];
    let mut push = Vec2::ZERO;

    for (j, other) in boids.iter().enumerate() {
        if j != i && distance(this.pos, other.pos) < min_distance {
            push += this.pos - other.pos;
        }
    }

    boids[i].vel += push * avoid_factor;
}

/// Alignment: steer toward the average velocity of boids within this boid's
/// own cohesion distance. No-op with zero neighbors.
pub fn match_velocity(boids: &mut [Boid], i: usize, matching_factor: f32) {
    let this = &boids[i];
    let mut avg = Vec2::ZERO;
    let mut neighbors = 0u32;

    for other in boids.iter() {
        if distance(this.pos, other.pos) < this.cohesion_distance {
            avg += other.vel;
            neighbors += 1;
        }
    }

    if neighbors > 0 {
        let avg = avg * (1.0 / neighbors as f32);
        let delta = (avg - boids[i].vel) * matching_factor;
        boids[i].vel += delta;
    }
}

/// Rescale the velocity to exactly `speed_limit` when it is exceeded,
/// preserving direction.
pub fn limit_speed(boid: &mut Boid, speed_limit: f32) {
    let speed = boid.vel.length();
    if speed > speed_limit {
        boid.vel = boid.vel * (speed_limit / speed);
    }
}

/// Constant nudge back toward the canvas while within `margin` of an edge.
/// Not proportional: the same `turn_factor` applies every tick inside the
/// margin.
pub fn keep_within_bounds(boid: &mut Boid, width: f32, height: f32, forces: &ForceConfig) {
    if boid.pos.x < forces.margin {
        boid.vel.x += forces.turn_factor;
    }
    if boid.pos.x > width - forces.margin {
        boid.vel.x -= forces.turn_factor;
    }
    if boid.pos.y < forces.margin {
        boid.vel.y += forces.turn_factor;
    }
    if boid.pos.y > height - forces.margin {
        boid.vel.y -= forces.turn_factor;
    }
}

/// Euler integration with unit timestep.
#[inline]
pub fn integrate(boid: &mut Boid) {
    boid.pos += boid.vel;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boid(x: f32, y: f32, dx: f32, dy: f32) -> Boid {
        Boid {
            pos: Vec2::new(x, y),
            vel: Vec2::new(dx, dy),
            cohesion_distance: 75.0,
            alignment_angle: 0.0,
        }
    }

    #[test]
    fn test_lone_boid_cohesion_is_noop() {
        // Self-inclusion: the only "neighbor" is the boid itself, so the
        // centroid coincides with its position.
        let mut boids = vec![boid(100.0, 100.0, 3.0, -2.0)];
        fly_towards_center(&mut boids, 0, 0.005);
        assert_eq!(boids[0].vel, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_lone_boid_alignment_is_noop() {
        let mut boids = vec![boid(100.0, 100.0, 3.0, -2.0)];
        match_velocity(&mut boids, 0, 0.05);
        assert_eq!(boids[0].vel, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_cohesion_pulls_toward_neighbor() {
        let mut boids = vec![boid(0.0, 0.0, 0.0, 0.0), boid(40.0, 0.0, 0.0, 0.0)];
        fly_towards_center(&mut boids, 0, 0.005);
        // Centroid is (20, 0): includes both the neighbor and the boid
        // itself.
        assert!((boids[0].vel.x - 20.0 * 0.005).abs() < 1e-6);
        assert_eq!(boids[0].vel.y, 0.0);
    }

    #[test]
    fn test_cohesion_respects_own_radius() {
        let mut boids = vec![boid(0.0, 0.0, 0.0, 0.0), boid(40.0, 0.0, 0.0, 0.0)];
        boids[0].cohesion_distance = 10.0; // Neighbor out of range.
        fly_towards_center(&mut boids, 0, 0.005);
        assert_eq!(boids[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_separation_pushes_apart() {
        let mut boids = vec![boid(0.0, 0.0, 0.0, 0.0), boid(10.0, 0.0, 0.0, 0.0)];
        avoid_others(&mut boids, 0, 25.0, 0.05);
        assert!(boids[0].vel.x < 0.0);
    }

    #[test]
    fn test_coincident_boids_feel_no_pairwise_forces() {
        // Two boids at the same position with zero velocity: separation
        // accumulates a zero offset, cohesion and alignment pull toward
        // values the boids already have.
        let mut boids = vec![boid(50.0, 50.0, 0.0, 0.0), boid(50.0, 50.0, 0.0, 0.0)];
        boids[0].cohesion_distance = 10.0;
        boids[1].cohesion_distance = 10.0;

        for i in 0..2 {
            fly_towards_center(&mut boids, i, 0.005);
            avoid_others(&mut boids, i, 25.0, 0.05);
            match_velocity(&mut boids, i, 0.05);
        }

        assert_eq!(boids[0].vel, Vec2::ZERO);
        assert_eq!(boids[1].vel, Vec2::ZERO);
    }

    #[test]
    fn test_alignment_moves_velocity_toward_average() {
        let mut boids = vec![boid(0.0, 0.0, 10.0, 0.0), boid(5.0, 0.0, 0.0, 10.0)];
        match_velocity(&mut boids, 0, 0.05);
        // Average velocity (self included) is (5, 5).
        assert!((boids[0].vel.x - (10.0 + (5.0 - 10.0) * 0.05)).abs() < 1e-6);
        assert!((boids[0].vel.y - (5.0 * 0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_limit_speed_rescales_to_exact_limit() {
        let mut b = boid(0.0, 0.0, 30.0, 40.0); // Speed 50.
        limit_speed(&mut b, 15.0);
        assert!((b.speed() - 15.0).abs() < 1e-5);
        // Direction preserved.
        assert!((b.vel.x / b.vel.y - 30.0 / 40.0).abs() < 1e-5);
    }

    #[test]
    fn test_limit_speed_leaves_slow_boids_alone() {
        let mut b = boid(0.0, 0.0, 3.0, 4.0);
        limit_speed(&mut b, 15.0);
        assert_eq!(b.vel, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_bounds_nudge_is_constant() {
        let forces = ForceConfig::default();
        let mut b = boid(50.0, 360.0, 0.0, 0.0); // Inside left margin only.
        keep_within_bounds(&mut b, 1280.0, 720.0, &forces);
        assert_eq!(b.vel, Vec2::new(1.0, 0.0));

        // Deeper inside the margin: same nudge.
        let mut b = boid(5.0, 360.0, 0.0, 0.0);
        keep_within_bounds(&mut b, 1280.0, 720.0, &forces);
        assert_eq!(b.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_bounds_corner_nudges_both_components() {
        let forces = ForceConfig::default();
        let mut b = boid(1275.0, 715.0, 0.0, 0.0);
        keep_within_bounds(&mut b, 1280.0, 720.0, &forces);
        assert_eq!(b.vel, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_integrate_advances_by_velocity() {
        let mut b = boid(10.0, 20.0, 1.5, -0.5);
        integrate(&mut b);
        assert_eq!(b.pos, Vec2::new(11.5, 19.5));
    }
}
