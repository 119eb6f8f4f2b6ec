pub mod evolution;
pub mod generator;
pub mod manager;
pub mod traits;

pub use evolution::EvolutionConfig;
pub use generator::{GenerationMode, GeneratorConfig};
pub use manager::{AppConfig, ConfigManager};
pub use traits::ConfigSection;
