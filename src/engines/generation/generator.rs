use crate::config::{ConfigSection, GenerationMode, GeneratorConfig};
use crate::engines::generation::program::Program;
use crate::error::{EvotreeError, Result};
use crate::functions::Function;
use crate::types::Node;
use rand::seq::SliceRandom;
use rand::Rng;

/// Builds random, structurally valid programs from a closed function set.
#[derive(Clone)]
pub struct TreeGenerator {
    functions: Vec<Function>,
    config: GeneratorConfig,
}

impl TreeGenerator {
    pub fn new(functions: Vec<Function>, config: GeneratorConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| EvotreeError::Generation(e.to_string()))?;
        if functions.is_empty() {
            return Err(EvotreeError::Generation(
                "function set must not be empty".to_string(),
            ));
        }
        if let Some(nullary) = functions.iter().find(|f| f.arity() == 0) {
            return Err(EvotreeError::Generation(format!(
                "function '{}' has arity 0; functions need at least one argument",
                nullary.alias()
            )));
        }
        Ok(Self { functions, config })
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a program using the configured mode.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Program {
        self.generate_with_mode(self.config.mode, rng)
    }

    /// Generate a program whose root is always a function.
    pub fn generate_with_mode<R: Rng>(&self, mode: GenerationMode, rng: &mut R) -> Program {
        match mode {
            GenerationMode::Grow => self.build(GenerationMode::Grow, rng),
            GenerationMode::Full => self.build(GenerationMode::Full, rng),
            GenerationMode::RampedHalfAndHalf => {
                if rng.gen_bool(0.5) {
                    self.build(GenerationMode::Grow, rng)
                } else {
                    self.build(GenerationMode::Full, rng)
                }
            }
        }
    }

    pub fn random_function<R: Rng>(&self, rng: &mut R) -> Function {
        // The function set is non-empty by construction.
        self.functions[rng.gen_range(0..self.functions.len())].clone()
    }

    /// Draw a terminal: a constant with probability `1 / (num_features + 1)`,
    /// otherwise a uniformly chosen input.
    pub fn random_terminal<R: Rng>(&self, rng: &mut R) -> Node {
        let num_features = self.config.num_features;
        let idx = rng.gen_range(0..=num_features);
        if idx == num_features {
            let value = self.config.constants.choose(rng).copied().unwrap_or(0.0);
            Node::Constant(value)
        } else {
            Node::Input(idx)
        }
    }

    pub fn functions_with_arity(&self, arity: usize) -> impl Iterator<Item = &Function> {
        self.functions.iter().filter(move |f| f.arity() == arity)
    }

    /// Grow draws once from the combined alphabet of every function, every input
    /// and a single constant slot.
    fn wants_function<R: Rng>(&self, mode: GenerationMode, rng: &mut R) -> bool {
        match mode {
            GenerationMode::Full => true,
            _ => {
                let alphabet = self.functions.len() + self.config.num_features + 1;
                rng.gen_range(0..alphabet) < self.functions.len()
            }
        }
    }

    fn build<R: Rng>(&self, mode: GenerationMode, rng: &mut R) -> Program {
        let root = self.random_function(rng);

        // Terminal slots still to fill at each open depth level.
        let mut slots = vec![root.arity()];
        let mut nodes = vec![Node::Function(root)];

        while !slots.is_empty() {
            let depth = slots.len();
            if depth < self.config.max_depth && self.wants_function(mode, rng) {
                let function = self.random_function(rng);
                slots.push(function.arity());
                nodes.push(Node::Function(function));
                continue;
            }

            nodes.push(self.random_terminal(rng));
            while let Some(remaining) = slots.last_mut() {
                *remaining -= 1;
                if *remaining > 0 {
                    break;
                }
                slots.pop();
            }
        }

        debug_assert!(super::program::is_valid(&nodes));
        Program::new(nodes)
    }
}
