use super::traits::ConfigSection;
use crate::engines::metrics::MetricKind;
use crate::error::{EvotreeError, Result};
use crate::functions::DEFAULT_FUNCTIONS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub tournament_size: usize,
    pub crossover_rate: f64,
    pub subtree_mutation_rate: f64,
    pub hoist_mutation_rate: f64,
    pub point_mutation_rate: f64,
    /// Per-node replacement probability used by point mutation.
    pub point_replacement_rate: f64,
    /// Offspring bred and inserted per generation.
    pub num_offspring: usize,
    /// Training stops once the best fitness drops below this value.
    pub stopping_threshold: f64,
    /// Function aliases resolved through the registry.
    pub functions: Vec<String>,
    pub metric: MetricKind,
    /// Cost added per program node; 0 disables parsimony pressure.
    pub parsimony_coefficient: f64,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            generations: 100,
            tournament_size: 3,
            crossover_rate: 0.7,
            subtree_mutation_rate: 0.1,
            hoist_mutation_rate: 0.05,
            point_mutation_rate: 0.1,
            point_replacement_rate: 0.05,
            num_offspring: 10,
            stopping_threshold: 0.01,
            functions: DEFAULT_FUNCTIONS.iter().map(|f| f.to_string()).collect(),
            metric: MetricKind::Mse,
            parsimony_coefficient: 0.0,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<()> {
        if self.population_size < 1 {
            return Err(EvotreeError::Configuration(
                "Population size must be at least 1".to_string()
            ));
        }
        let rates = [
            ("Crossover rate", self.crossover_rate),
            ("Subtree mutation rate", self.subtree_mutation_rate),
            ("Hoist mutation rate", self.hoist_mutation_rate),
            ("Point mutation rate", self.point_mutation_rate),
            ("Point replacement rate", self.point_replacement_rate),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(EvotreeError::Configuration(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        if self.functions.is_empty() {
            return Err(EvotreeError::Configuration(
                "At least one function is required".to_string()
            ));
        }
        if !self.parsimony_coefficient.is_finite() || self.parsimony_coefficient < 0.0 {
            return Err(EvotreeError::Configuration(
                "Parsimony coefficient must be a finite, non-negative value".to_string()
            ));
        }
        Ok(())
    }
}
