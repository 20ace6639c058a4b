//! Configuration for a savanna run.
//!
//! Supports YAML configuration files with defaults matching the classic
//! 50x50 setup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading, saving or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub erbast: SpeciesConfig,
    pub carviz: SpeciesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub results: ResultsConfig,
}

/// Grid and run-length configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Share of cells turned into water, in percent
    pub water_coverage: u32,
    /// Days after which the run stops even if both species survive
    pub max_days: u64,
}

/// Initial population of one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    pub initial_count: usize,
    /// Lifetime in days given to every creature, offspring included
    pub lifetime: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Days between stats snapshots and progress lines
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsConfig {
    /// JSON file that collects finished runs
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            erbast: SpeciesConfig {
                initial_count: 20,
                lifetime: 10,
            },
            carviz: SpeciesConfig {
                initial_count: 10,
                lifetime: 10,
            },
            logging: LoggingConfig::default(),
            results: ResultsConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: 50,
            water_coverage: 15,
            max_days: 10_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 100,
            log_level: "info".to_string(),
        }
    }
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("results.json"),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.world.grid_size * self.world.grid_size
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.grid_size < 3 {
            return Err(ConfigError::Invalid("grid_size must be at least 3".to_string()));
        }
        if self.world.water_coverage > 100 {
            return Err(ConfigError::Invalid(
                "water_coverage is a percentage and cannot exceed 100".to_string(),
            ));
        }
        if self.erbast.lifetime == 0 || self.carviz.lifetime == 0 {
            return Err(ConfigError::Invalid("lifetime must be > 0".to_string()));
        }
        if self.erbast.initial_count > self.cell_count() {
            return Err(ConfigError::Invalid(format!(
                "{} Erbast do not fit on {} cells",
                self.erbast.initial_count,
                self.cell_count()
            )));
        }
        if self.logging.stats_interval == 0 {
            return Err(ConfigError::Invalid("stats_interval must be > 0".to_string()));
        }
        Ok(())
    }
}
