use super::{
    evolution::EvolutionConfig,
    generator::GeneratorConfig,
    traits::ConfigSection,
};
use crate::error::{EvotreeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix of environment overrides, e.g. `EVOTREE__EVOLUTION__GENERATIONS=50`.
pub const ENV_PREFIX: &str = "EVOTREE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub evolution: EvolutionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.evolution.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Load a TOML or JSON file (by extension), layered with environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::debug!(
            "Loaded configuration from {} ({} and {} sections)",
            path.as_ref().display(),
            GeneratorConfig::section_name(),
            EvolutionConfig::section_name()
        );

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| EvotreeError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| EvotreeError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply an edit; the previous configuration is kept if the result is invalid.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut edited = config.clone();
        f(&mut edited);
        edited.validate()?;
        *config = edited;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
