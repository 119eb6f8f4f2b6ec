use super::traits::ConfigSection;
use crate::error::{EvotreeError, Result};
use serde::{Deserialize, Serialize};

/// Tree construction method.
///
/// `Grow` draws each inner slot from the union of functions and terminals and
/// tends to build irregular, shallow trees. `Full` only places terminals at the
/// maximum depth, giving bushy, balanced trees. `RampedHalfAndHalf` flips a fair
/// coin between the two on every tree, which keeps an initial population varied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationMode {
    Grow,
    Full,
    RampedHalfAndHalf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Maximum root-to-leaf path length in edges.
    pub max_depth: usize,
    pub num_features: usize,
    pub constants: Vec<f64>,
    pub mode: GenerationMode,
    /// Standard deviation of the noise point mutation adds to new constants.
    pub constant_jitter: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            num_features: 1,
            constants: vec![-1.0, 0.0, 1.0],
            mode: GenerationMode::RampedHalfAndHalf,
            constant_jitter: 1.0,
        }
    }
}

impl ConfigSection for GeneratorConfig {
    fn section_name() -> &'static str {
        "generator"
    }

    fn validate(&self) -> Result<()> {
        if self.max_depth < 1 {
            return Err(EvotreeError::Configuration(
                "Max depth must be at least 1".to_string()
            ));
        }
        if self.constants.is_empty() {
            return Err(EvotreeError::Configuration(
                "At least one constant is required".to_string()
            ));
        }
        if self.constants.iter().any(|c| !c.is_finite()) {
            return Err(EvotreeError::Configuration(
                "Constants must be finite".to_string()
            ));
        }
        if !self.constant_jitter.is_finite() || self.constant_jitter < 0.0 {
            return Err(EvotreeError::Configuration(
                "Constant jitter must be a finite, non-negative value".to_string()
            ));
        }
        Ok(())
    }
}
