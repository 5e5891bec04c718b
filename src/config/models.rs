//! Configuration schema for the prompt2img gateway.
//!
//! Covers the HTTP server, the Chutes API binding (credential + active
//! model), the image cache location, logging, and the user-extended provider
//! profile table persisted under `[profiles]`.

use crate::providers::ProviderProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (bind address, port, display host).
    #[serde(default)]
    pub server: ServerConfig,

    /// Chutes API settings: credential, active model, call timeout.
    #[serde(default)]
    pub chutes: ChutesConfig,

    /// Image cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// User-registered provider profiles, keyed by model name. Durable form
    /// of the registry's user-extended table.
    #[serde(default)]
    pub profiles: HashMap<String, ProviderProfile>,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `4444`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Hostname used when printing shareable links (`link` command).
    /// Default: `localhost`
    #[serde(default = "default_display_host")]
    pub display_host: String,
}

/// Settings for the upstream Chutes API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChutesConfig {
    /// Bearer credential attached to every upstream call.
    /// Default: empty (must be set before serving).
    #[serde(default)]
    pub api_key: String,

    /// Name of the model the gateway serves generations from.
    /// Default: empty (must be set before serving).
    #[serde(default)]
    pub model: String,

    /// Total upstream request timeout in seconds.
    /// Default: `60`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for the content-addressed image cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding cached images.
    /// Default: `./cache`
    #[serde(default = "default_cache_dir")]
    pub dir: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            display_host: default_display_host(),
        }
    }
}

impl Default for ChutesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Whether a credential has the recognized Chutes key shape.
///
/// Accepted keys start with `cpk_` or `sk_` and are at least 20 characters.
/// The shape check lives here in the configuration layer; the core trusts
/// the binding and lets the upstream reject a stale key with a 401.
pub fn is_valid_api_key(key: &str) -> bool {
    (key.starts_with("cpk_") || key.starts_with("sk_")) && key.len() >= 20
}

// Helper functions for serde defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4444
}

fn default_display_host() -> String {
    "localhost".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_cache_dir() -> String {
    "./cache".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4444);
        assert_eq!(config.server.display_host, "localhost");
        assert_eq!(config.chutes.timeout_seconds, 60);
        assert_eq!(config.cache.dir, "./cache");
        assert_eq!(config.logging.level, "info");
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_api_key_validation() {
        assert!(is_valid_api_key("cpk_0123456789abcdef0123"));
        assert!(is_valid_api_key("sk_0123456789abcdef01234"));

        assert!(!is_valid_api_key(""));
        assert!(!is_valid_api_key("cpk_short"));
        assert!(!is_valid_api_key("key_0123456789abcdef0123"));
    }

    #[test]
    fn test_profiles_survive_toml_round_trip() {
        let mut config = AppConfig::default();
        config
            .profiles
            .insert("my-model".to_string(), ProviderProfile::unified());

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.profiles["my-model"], ProviderProfile::unified());
    }
}
