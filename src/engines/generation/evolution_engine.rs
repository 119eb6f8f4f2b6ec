use crate::config::{AppConfig, ConfigSection, EvolutionConfig};
use crate::engines::evaluation::{execute, execute_cases};
use crate::engines::generation::{
    generator::TreeGenerator,
    operators::Operator,
    program::Program,
    progress::ProgressCallback,
    selection::TournamentSelection,
};
use crate::engines::metrics::Metric;
use crate::error::{EvotreeError, Result};
use crate::functions::FunctionRegistry;
use crate::types::{Case, Feature};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Evaluated,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    GenerationLimit,
    ThresholdReached,
}

/// Summary of a finished training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub generations_run: usize,
    pub best_fitness: f64,
    pub best_length: usize,
    pub best_depth: usize,
    pub best_expression: String,
    pub stop_reason: StopReason,
}

impl TrainingReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Steady-state genetic programming loop over a fixed-size population.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    generator: TreeGenerator,
    selector: TournamentSelection,
    metric: Arc<dyn Metric>,
    population: Vec<Program>,
    best: Option<Program>,
    state: EngineState,
    generation: usize,
    stop_reason: Option<StopReason>,
    rng: StdRng,
}

/// Score one program, storing NaN costs as infinitely bad.
fn score(
    program: &mut Program,
    cases: &[Case],
    inputs: &[Vec<f64>],
    metric: &dyn Metric,
) -> Result<()> {
    let outputs = execute_cases(program, inputs)?;
    let fitness = metric.fitness(cases, &outputs, program.len());
    if fitness.is_nan() {
        log::warn!("Non-finite fitness for {}, treating as infinite", program);
        program.set_fitness(f64::INFINITY);
    } else {
        program.set_fitness(fitness);
    }
    Ok(())
}

fn feature_matrix(cases: &[Case]) -> Vec<Vec<f64>> {
    cases.iter().map(Case::values).collect()
}

impl EvolutionEngine {
    pub fn new(
        config: EvolutionConfig,
        generator: TreeGenerator,
        metric: Arc<dyn Metric>,
    ) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            selector: TournamentSelection::new(config.tournament_size),
            population: Vec::with_capacity(config.population_size),
            config,
            generator,
            metric,
            best: None,
            state: EngineState::Uninitialized,
            generation: 0,
            stop_reason: None,
            rng,
        })
    }

    /// Build an engine from a validated configuration, resolving function aliases
    /// through `registry`.
    pub fn from_config(config: &AppConfig, registry: &FunctionRegistry) -> Result<Self> {
        config.validate()?;
        let functions = registry.function_set(&config.evolution.functions)?;
        let generator = TreeGenerator::new(functions, config.generator.clone())?;
        let metric = config
            .evolution
            .metric
            .build(config.evolution.parsimony_coefficient);
        Self::new(config.evolution.clone(), generator, metric)
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn generator(&self) -> &TreeGenerator {
        &self.generator
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Program] {
        &self.population
    }

    pub fn best(&self) -> Option<&Program> {
        self.best.as_ref()
    }

    /// Fill the population with freshly generated programs.
    pub fn initialize(&mut self) {
        while self.population.len() < self.config.population_size {
            let program = self.generator.generate(&mut self.rng);
            self.population.push(program);
        }
        self.population.truncate(self.config.population_size);
        self.state = EngineState::Initialized;
        log::debug!("Initialized population of {}", self.population.len());
    }

    /// Score every program that has no fitness yet.
    pub fn evaluate(&mut self, cases: &[Case]) -> Result<()> {
        if self.state == EngineState::Uninitialized {
            return Err(EvotreeError::Evolution(
                "Population must be initialized before evaluation".to_string(),
            ));
        }
        let inputs = feature_matrix(cases);
        self.evaluate_with(cases, &inputs)
    }

    fn evaluate_with(&mut self, cases: &[Case], inputs: &[Vec<f64>]) -> Result<()> {
        let metric = self.metric.as_ref();
        self.population
            .par_iter_mut()
            .filter(|program| !program.is_evaluated())
            .try_for_each(|program| score(program, cases, inputs, metric))?;

        self.rank();
        if self.state == EngineState::Initialized {
            self.state = EngineState::Evaluated;
        }
        Ok(())
    }

    fn rank(&mut self) {
        self.population
            .sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
        self.best = self.population.first().cloned();
    }

    /// Run a single steady-state generation.
    pub fn step(&mut self, cases: &[Case]) -> Result<()> {
        if self.state == EngineState::Uninitialized || self.state == EngineState::Initialized {
            return Err(EvotreeError::Evolution(
                "Population must be evaluated before stepping".to_string(),
            ));
        }
        let inputs = feature_matrix(cases);
        self.step_with(cases, &inputs)
    }

    fn step_with(&mut self, cases: &[Case], inputs: &[Vec<f64>]) -> Result<()> {
        for _ in 0..self.config.num_offspring {
            let operator = self.breed(cases, inputs)?;
            log::debug!("Offspring bred by {:?}", operator);
        }
        self.rank();
        self.generation += 1;
        Ok(())
    }

    fn breed(&mut self, cases: &[Case], inputs: &[Vec<f64>]) -> Result<Operator> {
        let parent = self
            .selector
            .select_index(&self.population, false, &mut self.rng)
            .ok_or_else(|| EvotreeError::Evolution("Population is empty".to_string()))?;

        let mut child = self.population[parent].clone();
        let operator = self.vary(&mut child);
        if !child.is_evaluated() {
            score(&mut child, cases, inputs, self.metric.as_ref())?;
        }

        let loser = self
            .selector
            .select_index(&self.population, true, &mut self.rng)
            .ok_or_else(|| EvotreeError::Evolution("Population is empty".to_string()))?;
        self.population[loser] = child;

        Ok(operator)
    }

    /// Apply at most one variation operator; the gates are tried in order.
    fn vary(&mut self, child: &mut Program) -> Operator {
        let config = &self.config;

        if self.rng.gen::<f64>() < config.crossover_rate {
            if let Some(donor) = self.selector.select_index(&self.population, false, &mut self.rng) {
                child.crossover(&self.population[donor], &mut self.rng);
            }
            Operator::Crossover
        } else if self.rng.gen::<f64>() < config.subtree_mutation_rate {
            child.subtree_mutation(&self.generator, &mut self.rng);
            Operator::SubtreeMutation
        } else if self.rng.gen::<f64>() < config.hoist_mutation_rate {
            child.hoist_mutation(&mut self.rng);
            Operator::HoistMutation
        } else if self.rng.gen::<f64>() < config.point_mutation_rate {
            child.point_mutation(&self.generator, config.point_replacement_rate, &mut self.rng);
            Operator::PointMutation
        } else {
            Operator::Reproduction
        }
    }

    fn threshold_reached(&self) -> bool {
        self.best
            .as_ref()
            .is_some_and(|best| best.fitness() < self.config.stopping_threshold)
    }

    /// Evolve until the generation limit or the stopping threshold is reached and
    /// return the best program found.
    pub fn train<C: ProgressCallback>(&mut self, cases: &[Case], mut callback: C) -> Result<&Program> {
        if cases.is_empty() {
            return Err(EvotreeError::Evolution("No training cases supplied".to_string()));
        }

        let inputs = feature_matrix(cases);
        if self.state == EngineState::Uninitialized {
            self.initialize();
        }
        self.evaluate_with(cases, &inputs)?;
        self.state = EngineState::Evaluated;

        log::info!(
            "Training on {} cases for up to {} generations",
            cases.len(),
            self.config.generations
        );

        self.stop_reason = Some(StopReason::GenerationLimit);
        for generation in 0..self.config.generations {
            if self.threshold_reached() {
                self.stop_reason = Some(StopReason::ThresholdReached);
                break;
            }

            callback.on_generation_start(generation);
            self.step_with(cases, &inputs)?;

            if let Some(best) = &self.best {
                callback.on_generation_complete(generation, best.fitness(), best.len());
            }
        }
        if self.threshold_reached() {
            self.stop_reason = Some(StopReason::ThresholdReached);
        }

        self.state = EngineState::Terminated;
        let best = self
            .best
            .as_ref()
            .ok_or_else(|| EvotreeError::Evolution("Training produced no program".to_string()))?;
        log::info!("Training finished. Best fitness: {:.6} {}", best.fitness(), best);
        Ok(best)
    }

    /// Execute the best program on a single set of features.
    pub fn test(&self, features: &[Feature]) -> Result<f64> {
        let best = self
            .best
            .as_ref()
            .ok_or_else(|| EvotreeError::Evolution("Engine has not been trained".to_string()))?;
        let values: Vec<f64> = features.iter().map(|f| f.value).collect();
        execute(best, &values)
    }

    /// Summary of the last training run, if one has completed.
    pub fn report(&self) -> Option<TrainingReport> {
        if self.state != EngineState::Terminated {
            return None;
        }
        let best = self.best.as_ref()?;
        Some(TrainingReport {
            generations_run: self.generation,
            best_fitness: best.fitness(),
            best_length: best.len(),
            best_depth: best.depth(),
            best_expression: best.to_string(),
            stop_reason: self.stop_reason.unwrap_or(StopReason::GenerationLimit),
        })
    }
}
