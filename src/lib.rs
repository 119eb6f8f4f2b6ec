//! Tree-based genetic programming for symbolic regression.
//!
//! Programs are flat prefix-order node sequences evolved by a steady-state loop
//! with tournament selection, crossover and three flavours of mutation.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod types;
pub mod utils;

pub use config::{AppConfig, ConfigManager, EvolutionConfig, GenerationMode, GeneratorConfig};
pub use engines::evaluation::{execute, execute_cases};
pub use engines::generation::{
    parse_sexpr, EngineState, EvolutionEngine, LoggingProgressCallback, Program,
    ProgressCallback, TrainingReport, TreeGenerator,
};
pub use engines::metrics::{Metric, MetricKind};
pub use error::{EvotreeError, Result};
pub use functions::{Function, FunctionRegistry, Primitive};
pub use types::{Case, Cases, Feature, Node, Outputs};
