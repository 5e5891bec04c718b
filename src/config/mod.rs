// Configuration module

mod models;

pub use models::*;

use crate::error::{GatewayError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(
                Config::try_from(&Self::default())
                    .map_err(|e| GatewayError::Config(e.to_string()))?,
            )
            // Load from config file if it exists
            .add_source(
                File::with_name(&Self::default_config_path().to_string_lossy()).required(false),
            )
            // Override with environment variables (prefix: PROMPT2IMG_)
            .add_source(Environment::with_prefix("PROMPT2IMG").separator("__"))
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// Write the full configuration back to the config file as TOML.
    ///
    /// Management commands call this after every change; a newly registered
    /// profile is durable only once this save succeeds.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_config_path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let text =
            toml::to_string_pretty(self).map_err(|e| GatewayError::Config(e.to_string()))?;
        std::fs::write(&path, text)?;
        Ok(())
    }

    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".prompt2img")
            .join("config.toml")
    }
}
