//! Settings for the genetic adaptation layer.
//!
//! Every `interval` ticks the flock is ranked by fitness and the selected
//! strategy rewrites the evolved traits (cohesion distance, alignment angle)
//! of part of the population.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Genetic adaptation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionSettings {
    /// Ticks between evolution steps (and metrics snapshots).
    #[serde(default = "default_interval")]
    pub interval: u64,
    /// Probability of each trait mutation, once a boid is selected for
    /// mutation.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    /// Weight of the cohesion term in the combined fitness.
    #[serde(default = "default_cohesion_weight")]
    pub cohesion_weight: f32,
    /// Weight of the alignment term in the combined fitness.
    #[serde(default = "default_alignment_weight")]
    pub alignment_weight: f32,
    /// Strategy used to rewrite traits each generation.
    #[serde(default)]
    pub strategy: EvolutionStrategy,
}

impl Default for EvolutionSettings {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            mutation_rate: default_mutation_rate(),
            cohesion_weight: default_cohesion_weight(),
            alignment_weight: default_alignment_weight(),
            strategy: EvolutionStrategy::default(),
        }
    }
}

fn default_interval() -> u64 {
    50
}
fn default_mutation_rate() -> f32 {
    0.3
}
fn default_cohesion_weight() -> f32 {
    0.5
}
fn default_alignment_weight() -> f32 {
    0.5
}

/// Trait-rewrite strategy, chosen once per run and never mixed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type")]
pub enum EvolutionStrategy {
    /// Hill-climbing via probabilistic local mutation: each boid mutates
    /// with probability `1 - fitness / best_fitness`.
    #[default]
    TraitMutation,
    /// Keep the top `elite_count` boids untouched; every other boid
    /// inherits the averaged cohesion distance of two random parents and
    /// is then passed through the mutation operator.
    ElitismCrossover { elite_count: usize },
}

impl EvolutionSettings {
    /// Validate against the configured flock size.
    pub fn validate(&self, num_boids: usize) -> Result<(), ConfigError> {
        if self.interval == 0 {
            return Err(ConfigError::InvalidEvolutionInterval);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if self.cohesion_weight < 0.0
            || self.alignment_weight < 0.0
            || self.cohesion_weight + self.alignment_weight <= 0.0
        {
            return Err(ConfigError::InvalidFitnessWeights);
        }
        if let EvolutionStrategy::ElitismCrossover { elite_count } = self.strategy
            && elite_count >= num_boids
        {
            return Err(ConfigError::InvalidEliteCount {
                elites: elite_count,
                flock: num_boids,
            });
        }
        Ok(())
    }
}

/// Record emitted by each evolution step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generations since the last strict fitness improvement.
    pub generation_count: u32,
    /// Best per-boid fitness ever observed in this run.
    pub best_fitness: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        assert!(EvolutionSettings::default().validate(100).is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let settings = EvolutionSettings {
            interval: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(100),
            Err(ConfigError::InvalidEvolutionInterval)
        ));
    }

    #[test]
    fn test_elite_count_must_leave_offspring() {
        let settings = EvolutionSettings {
            strategy: EvolutionStrategy::ElitismCrossover { elite_count: 10 },
            ..Default::default()
        };
        assert!(settings.validate(11).is_ok());
        assert!(matches!(
            settings.validate(10),
            Err(ConfigError::InvalidEliteCount { .. })
        ));
    }

    #[test]
    fn test_strategy_serialization() {
        let strategy = EvolutionStrategy::ElitismCrossover { elite_count: 5 };
        let json = serde_json::to_string(&strategy).unwrap();
        let parsed: EvolutionStrategy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, strategy);
    }
}
