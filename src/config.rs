// src/config.rs
use crate::extractor::DEFAULT_MAX_INPUT_BYTES;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub bind_addr: String,
    pub max_workers: usize,
    pub log_level: String,
    /// Largest paste the extractor accepts, in bytes.
    pub max_input_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            max_workers: 8,
            log_level: "info".to_string(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl AppConfig {
    /// Defaults, then `LandCalc.toml` if present, then `LANDCALC_*`
    /// environment variables.
    pub fn load() -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();

        Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("max_workers", defaults.max_workers as u64)?
            .set_default("log_level", defaults.log_level)?
            .set_default("max_input_bytes", defaults.max_input_bytes as u64)?
            .add_source(ConfigFile::with_name("LandCalc").required(false))
            .add_source(Environment::with_prefix("LANDCALC").try_parsing(true))
            .build()?
            .try_deserialize::<AppConfig>()
    }
}
