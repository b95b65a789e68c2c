//! CLI configuration
//!
//! Logging settings come from `CAPSULE_LOG_`-prefixed variables; the
//! connection itself is configured through [`infra_http::CapsuleConfig`].

use serde::Deserialize;

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human readable logs
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CAPSULE_LOG"))
            .build()?
            .try_deserialize()
    }
}
