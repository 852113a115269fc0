//! Generational trait rewriting.
//!
//! Hill-climbing via probabilistic local mutation is the canonical
//! strategy; an elitism+crossover variant can be selected at configuration
//! time instead. The two are never mixed within one run.

use std::cmp::Ordering;

use log::debug;
use rand::Rng;

use crate::schema::{EvolutionStrategy, GenerationRecord, SimulationConfig};

use super::super::boid::Boid;
use super::super::geometry::Vec2;
use super::fitness::fitness;

/// Best-fitness-ever tracking, persisting across evolution steps.
#[derive(Debug, Clone)]
pub struct FitnessState {
    /// Monotonically non-decreasing once any fitness has been observed.
    pub best_fitness: f32,
    /// Generations since the last strict improvement.
    pub generation_count: u32,
}

impl Default for FitnessState {
    fn default() -> Self {
        Self {
            best_fitness: f32::NEG_INFINITY,
            generation_count: 0,
        }
    }
}

/// Run one evolution step over the flock, mutating evolved traits in place
/// and updating the best-fitness bookkeeping.
pub fn evolve<R: Rng>(
    boids: &mut [Boid],
    state: &mut FitnessState,
    config: &SimulationConfig,
    rng: &mut R,
) -> GenerationRecord {
    let settings = &config.evolution;

    // Fitness is computed once, pre-mutation, and ranked descending.
    let mut ranked: Vec<(usize, f32)> = (0..boids.len())
        .map(|i| (i, fitness(boids, i, settings, config.visual_range)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    match settings.strategy {
        EvolutionStrategy::TraitMutation => {
            for &(i, fit) in &ranked {
                // Until the first best is recorded every boid mutates.
                let probability = if state.best_fitness == f32::NEG_INFINITY {
                    1.0
                } else {
                    1.0 - fit / state.best_fitness
                };
                if rng.gen_range(0.0..1.0) < probability {
                    mutate(&mut boids[i], config, rng);
                }
            }
        }
        EvolutionStrategy::ElitismCrossover { elite_count } => {
            // Parents are drawn from the pre-crossover trait pool.
            let parent_traits: Vec<f32> = boids.iter().map(|b| b.cohesion_distance).collect();
            for &(i, _) in ranked.iter().skip(elite_count) {
                let a = parent_traits[rng.gen_range(0..parent_traits.len())];
                let b = parent_traits[rng.gen_range(0..parent_traits.len())];
                boids[i].cohesion_distance = (a + b) / 2.0;
                mutate(&mut boids[i], config, rng);
            }
        }
    }

    let current_best = ranked.first().map(|&(_, fit)| fit).unwrap_or(0.0);
    if current_best > state.best_fitness {
        state.best_fitness = current_best;
        state.generation_count = 0;
    } else {
        state.generation_count += 1;
    }

    debug!(
        "generation {}: best fitness {}",
        state.generation_count, state.best_fitness
    );

    GenerationRecord {
        generation_count: state.generation_count,
        best_fitness: state.best_fitness,
    }
}

/// Mutation operator shared by both strategies: each evolved trait is
/// independently rewritten with probability `mutation_rate`.
fn mutate<R: Rng>(boid: &mut Boid, config: &SimulationConfig, rng: &mut R) {
    let rate = config.evolution.mutation_rate;

    if rng.gen_range(0.0..1.0) < rate {
        boid.cohesion_distance =
            rng.gen_range(config.min_cohesion_distance..=config.max_cohesion_distance);
    }
    boid.cohesion_distance = boid
        .cohesion_distance
        .clamp(config.min_cohesion_distance, config.max_cohesion_distance);

    if rng.gen_range(0.0..1.0) < rate {
        let delta = rng.gen_range(-std::f32::consts::PI..std::f32::consts::PI);
        boid.alignment_angle += delta;
        // The new heading replaces the velocity at unit speed.
        boid.vel = Vec2::from_angle(boid.alignment_angle);
    }
}
