//! Configuration management for the crop cycle planning server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROPCYCLE_ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Model store configuration
    pub models: ModelsConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelsConfig {
    /// Directory holding the feature columns, stage list and per-stage models
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human readable format
    pub json: bool,
}

/// Prefix of the environment variable overrides
pub const ENV_PREFIX: &str = "CROPCYCLE";

const ENVIRONMENT_VAR: &str = "CROPCYCLE_ENVIRONMENT";

impl Config {
    /// Load configuration from files and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading overrides from `vars` instead of the
    /// process environment when given
    pub fn load_from(vars: Option<config::Map<String, String>>) -> Result<Self, ConfigError> {
        let environment = match &vars {
            Some(vars) => vars.get(ENVIRONMENT_VAR).cloned(),
            None => std::env::var(ENVIRONMENT_VAR).ok(),
        }
        .unwrap_or_else(|| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5002)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("models.directory", "models")?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables, e.g. CROPCYCLE_SERVER__PORT
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            models: ModelsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5002,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("models"),
        }
    }
}
