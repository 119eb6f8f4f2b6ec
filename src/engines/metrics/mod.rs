pub mod fitness;

pub use fitness::{MeanAbsoluteError, MeanSquaredError, Metric, Parsimony, SumSquaredError};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Metric presets selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    Sse,
    Mse,
    Mae,
}

impl MetricKind {
    /// Build the preset, wrapped in [`Parsimony`] when `parsimony_coefficient > 0`.
    pub fn build(self, parsimony_coefficient: f64) -> Arc<dyn Metric> {
        if parsimony_coefficient > 0.0 {
            match self {
                MetricKind::Sse => Arc::new(Parsimony::new(SumSquaredError, parsimony_coefficient)),
                MetricKind::Mse => Arc::new(Parsimony::new(MeanSquaredError, parsimony_coefficient)),
                MetricKind::Mae => Arc::new(Parsimony::new(MeanAbsoluteError, parsimony_coefficient)),
            }
        } else {
            match self {
                MetricKind::Sse => Arc::new(SumSquaredError),
                MetricKind::Mse => Arc::new(MeanSquaredError),
                MetricKind::Mae => Arc::new(MeanAbsoluteError),
            }
        }
    }
}
