//! Structured logging setup and credential masking.
//!
//! Configures the `tracing` ecosystem for the gateway and provides the
//! masking helper used anywhere an API key could otherwise reach a log sink
//! or terminal output.

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Mask a credential for display: first four and last four characters with
/// the middle replaced, so settings output and logs never carry a usable key.
///
/// Counts characters, not bytes: key validation only checks prefix and byte
/// length, so a key body may contain multibyte text.
pub fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "not set".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("cpk_0123456789abcdef0123"), "cpk_****0123");
        assert_eq!(mask_key(""), "not set");
        assert_eq!(mask_key("short"), "****");
    }

    #[test]
    fn test_mask_key_multibyte() {
        // 14 characters, far more bytes; must not split inside a character.
        assert_eq!(mask_key("cpk_日本語の鍵データです"), "cpk_****ータです");
        assert_eq!(mask_key("日本語の鍵"), "****");
    }

    #[test]
    fn test_masked_key_hides_the_middle() {
        let key = "sk_supersecretvalue12345";
        let masked = mask_key(key);
        assert!(!masked.contains("supersecret"));
    }
}
