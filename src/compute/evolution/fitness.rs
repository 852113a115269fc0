//! Per-boid fitness scoring.
//!
//! Fitness combines two emergent signals: how tightly a boid is packed with
//! flock-mates inside its own cohesion distance, and how closely its heading
//! tracks the mean heading of its neighbors.

use crate::schema::EvolutionSettings;

use super::super::boid::Boid;
use super::super::geometry::distance;

/// Sum of `1 / distance` over flock-mates inside this boid's cohesion
/// distance. Closer neighbors contribute more; zero-distance pairs are
/// excluded to keep the sum finite.
pub fn cohesion_fitness(boids: &[Boid], i: usize) -> f32 {
    let this = &boids[i];
    let mut score = 0.0;

    for other in boids {
        let dist = distance(this.pos, other.pos);
        if dist != 0.0 && dist < this.cohesion_distance {
            score += 1.0 / dist;
        }
    }

    score
}

/// `1 - |own heading - mean neighbor heading| / pi`, where neighbors are
/// the other boids within `visual_range`. A boid with no neighbors scores
/// a perfect 1.0 by convention.
///
/// The mean is the arithmetic mean of `atan2` headings, so flocks whose
/// headings straddle the branch cut at +-pi can score below zero. This
/// matches the quirk of the original scoring and keeps the ranking it
/// produces.
pub fn alignment_fitness(boids: &[Boid], i: usize, visual_range: f32) -> f32 {
    let Some(mean_heading) = mean_neighbor_heading(boids, i, visual_range) else {
        return 1.0;
    };

    let deviation = (boids[i].heading() - mean_heading).abs();
    1.0 - deviation / std::f32::consts::PI
}

/// Weighted combination of the cohesion and alignment terms.
pub fn fitness(boids: &[Boid], i: usize, settings: &EvolutionSettings, visual_range: f32) -> f32 {
    settings.cohesion_weight * cohesion_fitness(boids, i)
        + settings.alignment_weight * alignment_fitness(boids, i, visual_range)
}

/// Arithmetic mean of the headings of the other boids within
/// `visual_range`, or None if the boid has no neighbors.
pub(crate) fn mean_neighbor_heading(boids: &[Boid], i: usize, visual_range: f32) -> Option<f32> {
    let this = &boids[i];
    let mut sum = 0.0;
    let mut neighbors = 0u32;

    for (j, other) in boids.iter().enumerate() {
        if j != i && distance(this.pos, other.pos) < visual_range {
            sum += other.heading();
            neighbors += 1;
        }
    }

    (neighbors > 0).then(|| sum / neighbors as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::geometry::Vec2;

    fn boid(x: f32, y: f32, dx: f32, dy: f32) -> Boid {
        Boid {
            pos: Vec2::new(x, y),
            vel: Vec2::new(dx, dy),
            cohesion_distance: 75.0,
            alignment_angle: 0.0,
        }
    }

    #[test]
    fn test_cohesion_fitness_rewards_closer_neighbors() {
        let tight = vec![boid(0.0, 0.0, 1.0, 0.0), boid(10.0, 0.0, 1.0, 0.0)];
        let loose = vec![boid(0.0, 0.0, 1.0, 0.0), boid(50.0, 0.0, 1.0, 0.0)];
        assert!(cohesion_fitness(&tight, 0) > cohesion_fitness(&loose, 0));
    }

    #[test]
    fn test_cohesion_fitness_excludes_zero_distance() {
        // Self always sits at distance zero; a coincident flock-mate must
        // be skipped too.
        let boids = vec![boid(5.0, 5.0, 1.0, 0.0), boid(5.0, 5.0, 1.0, 0.0)];
        assert_eq!(cohesion_fitness(&boids, 0), 0.0);
    }

    #[test]
    fn test_cohesion_fitness_ignores_out_of_range() {
        let mut boids = vec![boid(0.0, 0.0, 1.0, 0.0), boid(40.0, 0.0, 1.0, 0.0)];
        boids[0].cohesion_distance = 30.0;
        assert_eq!(cohesion_fitness(&boids, 0), 0.0);
    }

    #[test]
    fn test_alignment_fitness_perfect_without_neighbors() {
        let boids = vec![boid(0.0, 0.0, 1.0, 0.0)];
        assert_eq!(alignment_fitness(&boids, 0, 100.0), 1.0);
    }

    #[test]
    fn test_alignment_fitness_perfect_when_headings_match() {
        let boids = vec![boid(0.0, 0.0, 1.0, 0.0), boid(10.0, 0.0, 2.0, 0.0)];
        assert!((alignment_fitness(&boids, 0, 100.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_alignment_fitness_penalizes_deviation() {
        // Neighbor heads +y (pi/2) while this boid heads +x (0):
        // deviation pi/2 gives fitness 0.5.
        let boids = vec![boid(0.0, 0.0, 1.0, 0.0), boid(10.0, 0.0, 0.0, 1.0)];
        assert!((alignment_fitness(&boids, 0, 100.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_combined_fitness_uses_weights() {
        let boids = vec![boid(0.0, 0.0, 1.0, 0.0), boid(10.0, 0.0, 1.0, 0.0)];
        let settings = EvolutionSettings::default(); // 0.5 / 0.5
        let expected =
            0.5 * cohesion_fitness(&boids, 0) + 0.5 * alignment_fitness(&boids, 0, 100.0);
        assert!((fitness(&boids, 0, &settings, 100.0) - expected).abs() < 1e-6);
    }
}
