use anyhow::Context;
use evotree::config::{AppConfig, ConfigManager};
use evotree::data::{CaseLoader, CsvCaseLoader};
use evotree::engines::generation::{EvolutionEngine, ProgressCallback};
use evotree::functions::FunctionRegistry;
use evotree::types::{Case, Cases, Feature};
use evotree::utils::interval;
use std::env;

/// Samples `x^4 + x^3 + x^2 + x` on `[-1, 1]`.
struct QuarticCases;

impl CaseLoader for QuarticCases {
    fn load_cases(&self) -> evotree::Result<Cases> {
        Ok(interval(-1.0, 1.0, 0.1)
            .into_iter()
            .map(|x| Case::new(vec![Feature::new("x", x)], x.powi(4) + x.powi(3) + x * x + x))
            .collect())
    }
}

/// CLI progress callback with formatted output
struct CliProgressCallback {
    start_time: std::time::Instant,
}

impl ProgressCallback for CliProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, best_length: usize) {
        println!(
            "Generation {}: best = {:.6}, length = {}, time = {:.2}s",
            generation + 1,
            best_fitness,
            best_length,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!("=== Symbolic regression demo ===\n");

    // Optional arguments: config file, then a CSV of cases.
    let args: Vec<String> = env::args().collect();

    let manager = ConfigManager::new();
    if let Some(path) = args.get(1) {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading config from {}", path))?;
    } else {
        manager.update(|config: &mut AppConfig| {
            config.generator.max_depth = 4;
            config.evolution.population_size = 200;
            config.evolution.generations = 200;
            config.evolution.num_offspring = 20;
            config.evolution.seed = Some(42);
        })?;
    }
    let config = manager.get();

    let cases = match args.get(2) {
        Some(path) => CsvCaseLoader::new(path, config.generator.num_features).load_cases()?,
        None => QuarticCases.load_cases()?,
    };
    println!("Loaded {} cases", cases.len());

    let registry = FunctionRegistry::new();
    let mut engine = EvolutionEngine::from_config(&config, &registry)?;
    let callback = CliProgressCallback {
        start_time: std::time::Instant::now(),
    };
    let best = engine.train(&cases, callback)?;
    println!("\nBest program: {}", best);

    let prediction = engine.test(&[Feature::new("x", 0.5)])?;
    println!("f(0.5) = {:.6} (expected 0.937500)", prediction);

    if let Some(report) = engine.report() {
        println!("{}", report.to_json()?);
    }
    Ok(())
}
