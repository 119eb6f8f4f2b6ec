pub mod evolution_engine;
pub mod generator;
pub mod operators;
pub mod program;
pub mod progress;
pub mod sampling;
pub mod selection;
pub mod sexpr;

pub use evolution_engine::{EngineState, EvolutionEngine, StopReason, TrainingReport};
pub use generator::TreeGenerator;
pub use operators::Operator;
pub use program::{is_valid, subtree_span, Program};
pub use progress::{LoggingProgressCallback, ProgressCallback, SilentProgressCallback};
pub use sampling::sample_subtree;
pub use selection::TournamentSelection;
pub use sexpr::parse_sexpr;
