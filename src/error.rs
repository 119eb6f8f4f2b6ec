use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvotreeError {
    #[error("Invalid program: {0}")]
    InvalidProgram(String),

    #[error("Arity mismatch for '{function}': expected {expected} arguments, got {actual}")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Feature index {index} out of range for {len} features")]
    FeatureIndexOutOfRange { index: usize, len: usize },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Evolution error: {0}")]
    Evolution(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, EvotreeError>;
