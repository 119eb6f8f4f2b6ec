use crate::error::{EvotreeError, Result};
use std::fmt;
use std::sync::Arc;

/// A primitive function usable as an inner node of a program.
///
/// Implementations must be pure: the same arguments always give the same result.
/// Numerically degenerate inputs (zero divisors, negative roots, ...) are handled
/// inside `apply` with a protected fallback value rather than reported as errors.
pub trait Primitive: Send + Sync {
    /// Display name
    fn ui_name(&self) -> &str;

    /// Registry key
    fn alias(&self) -> &str;

    /// Symbol used when rendering a program as an S-expression
    fn symbol(&self) -> &str;

    /// Number of arguments consumed
    fn arity(&self) -> usize;

    /// Apply the operation. `args.len()` is guaranteed to equal `arity()`.
    fn apply(&self, args: &[f64]) -> f64;

    /// Arity-checked evaluation.
    fn evaluate(&self, args: &[f64]) -> Result<f64> {
        if args.len() != self.arity() {
            return Err(EvotreeError::ArityMismatch {
                function: self.alias().to_string(),
                expected: self.arity(),
                actual: args.len(),
            });
        }
        Ok(self.apply(args))
    }
}

/// Shared handle to a primitive, as stored in function nodes.
pub type Function = Arc<dyn Primitive>;

type Operation = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// A primitive backed by a closure, for problem-specific function sets.
#[derive(Clone)]
pub struct CustomPrimitive {
    ui_name: String,
    alias: String,
    symbol: String,
    arity: usize,
    operation: Arc<Operation>,
}

impl CustomPrimitive {
    pub fn new<F>(alias: &str, symbol: &str, arity: usize, operation: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            ui_name: alias.to_string(),
            alias: alias.to_string(),
            symbol: symbol.to_string(),
            arity,
            operation: Arc::new(operation),
        }
    }

    pub fn with_ui_name(mut self, ui_name: &str) -> Self {
        self.ui_name = ui_name.to_string();
        self
    }
}

impl fmt::Debug for CustomPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPrimitive")
            .field("alias", &self.alias)
            .field("symbol", &self.symbol)
            .field("arity", &self.arity)
            .finish()
    }
}

impl Primitive for CustomPrimitive {
    fn ui_name(&self) -> &str { &self.ui_name }
    fn alias(&self) -> &str { &self.alias }
    fn symbol(&self) -> &str { &self.symbol }
    fn arity(&self) -> usize { self.arity }
    fn apply(&self, args: &[f64]) -> f64 {
        (self.operation)(args)
    }
}
