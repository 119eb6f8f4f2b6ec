use crate::error::{EvotreeError, Result};
use crate::functions::{
    primitives::{
        Addition, Cosine, Cube, Division, Exponent, HyperbolicTangent, Inverse, Multiplication,
        NaturalLog, Negation, Sine, Square, SquareRoot, Subtraction, Tangent,
    },
    traits::{Function, Primitive},
};
use std::{collections::HashMap, sync::Arc};

/// Aliases of the default arithmetic function set.
pub const DEFAULT_FUNCTIONS: [&str; 4] = ["add", "sub", "mul", "div"];

/// Available primitives keyed by alias.
///
/// A run works on a closed subset of the registry, resolved once through
/// [`FunctionRegistry::function_set`].
pub struct FunctionRegistry {
    functions: HashMap<String, Function>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_arithmetic();
        registry.register_transcendental();
        registry
    }

    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Add or replace a primitive under its alias.
    pub fn register(&mut self, primitive: Arc<dyn Primitive>) {
        self.functions
            .insert(primitive.alias().to_string(), primitive);
    }

    pub fn get_primitive(&self, alias: &str) -> Option<Function> {
        self.functions.get(alias).cloned()
    }

    /// Resolve aliases into a function set, preserving order.
    pub fn function_set<S: AsRef<str>>(&self, aliases: &[S]) -> Result<Vec<Function>> {
        aliases
            .iter()
            .map(|alias| {
                let alias = alias.as_ref();
                self.get_primitive(alias).ok_or_else(|| {
                    EvotreeError::Configuration(format!(
                        "Unknown function '{}' (available: {})",
                        alias,
                        self.aliases().join(", ")
                    ))
                })
            })
            .collect()
    }

    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn register_arithmetic(&mut self) {
        let primitives: Vec<Arc<dyn Primitive>> = vec![
            Arc::new(Addition),
            Arc::new(Subtraction),
            Arc::new(Multiplication),
            Arc::new(Division),
            Arc::new(Negation),
            Arc::new(Inverse),
            Arc::new(Square),
            Arc::new(Cube),
            Arc::new(SquareRoot),
            Arc::new(Exponent),
        ];
        for primitive in primitives {
            self.register(primitive);
        }
    }

    fn register_transcendental(&mut self) {
        let primitives: Vec<Arc<dyn Primitive>> = vec![
            Arc::new(Sine),
            Arc::new(Cosine),
            Arc::new(Tangent),
            Arc::new(HyperbolicTangent),
            Arc::new(NaturalLog),
        ];
        for primitive in primitives {
            self.register(primitive);
        }
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
