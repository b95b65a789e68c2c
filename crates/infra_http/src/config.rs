//! Client configuration
//!
//! The connection needs the account name (or an explicit base URL) and an
//! API token. Values are read from `CAPSULE_`-prefixed environment variables:
//!
//! * `CAPSULE_ACCOUNT` - account subdomain, `sample` for `sample.capsulecrm.com`
//! * `CAPSULE_API_TOKEN` - API token of the user the client acts as
//! * `CAPSULE_BASE_URL` - overrides the URL derived from the account
//! * `CAPSULE_TIMEOUT_SECS` - request timeout (default: 30)
//! * `CAPSULE_USER_AGENT` - user agent header

use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::error::HttpError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    concat!("capsule-client/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Capsule connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CapsuleConfig {
    /// Account subdomain
    #[serde(default)]
    pub account: Option<String>,
    /// Explicit API root, used instead of the account URL when set
    #[serde(default)]
    pub base_url: Option<String>,
    /// API token, sent as the basic auth user name
    pub api_token: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl CapsuleConfig {
    /// Creates a configuration for `https://{account}.capsulecrm.com`
    pub fn new(account: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
            base_url: None,
            api_token: api_token.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }

    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CAPSULE"))
            .build()?
            .try_deserialize()
    }

    /// Points the client at another host, such as a local mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolves the API root
    ///
    /// `base_url` wins when set; otherwise the URL is derived from the
    /// account name. A path prefix in `base_url` is kept and always ends
    /// with `/`.
    pub fn base_url(&self) -> Result<Url, HttpError> {
        if let Some(base_url) = self.base_url.as_deref().filter(|url| !url.trim().is_empty()) {
            let mut url = Url::parse(base_url.trim())?;
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            return Ok(url);
        }
        match self.account.as_deref().map(str::trim) {
            Some(account) if !account.is_empty() => {
                Ok(Url::parse(&format!("https://{account}.capsulecrm.com"))?)
            }
            _ => Err(HttpError::Config(
                "either an account or a base URL is required".to_string(),
            )),
        }
    }

    /// Checks that the configuration can produce a working connection
    pub fn validate(&self) -> Result<(), HttpError> {
        if self.api_token.trim().is_empty() {
            return Err(HttpError::Config("API token is required".to_string()));
        }
        self.base_url().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_account() {
        let config = CapsuleConfig::new("sample", "token");
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://sample.capsulecrm.com/"
        );
    }

    #[test]
    fn test_base_url_override() {
        let config = CapsuleConfig::new("sample", "token").with_base_url("http://127.0.0.1:4000");
        assert_eq!(config.base_url().unwrap().as_str(), "http://127.0.0.1:4000/");
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let config = CapsuleConfig::new("sample", "token").with_base_url("http://proxy.local/capsule");
        assert_eq!(config.base_url().unwrap().as_str(), "http://proxy.local/capsule/");
    }

    #[test]
    fn test_validate() {
        assert!(CapsuleConfig::new("sample", "token").validate().is_ok());
        assert!(matches!(
            CapsuleConfig::new("sample", " ").validate(),
            Err(HttpError::Config(_))
        ));
        assert!(matches!(
            CapsuleConfig::new("", "token").validate(),
            Err(HttpError::Config(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = CapsuleConfig::new("sample", "token");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("capsule-client/"));
    }
}
