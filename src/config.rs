//! Client configuration
//!
//! A [`ClientConfig`] is read from a YAML or JSON file and can be overridden
//! from `TWITTER_*` environment variables.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use crate::types::ApiVersion;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default REST API host
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// Configuration for [`crate::http::TwitterClient`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API generation used for URLs and pagination rules
    #[serde(default)]
    pub api_version: ApiVersion,

    /// API host, without version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Pre-issued bearer token
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Consumer key for application-only auth
    #[serde(default)]
    pub consumer_key: Option<String>,

    /// Consumer secret for application-only auth
    #[serde(default)]
    pub consumer_secret: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Client-side rate limit; absent disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("twitter-pager/{}", env!("CARGO_PKG_VERSION"))
}

#[allow(clippy::unnecessary_wraps)]
fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_version: ApiVersion::default(),
            base_url: default_base_url(),
            bearer_token: None,
            consumer_key: None,
            consumer_secret: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            rate_limit: default_rate_limit(),
        }
    }
}

impl ClientConfig {
    /// Load a config file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Override fields from a variable lookup
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(token) = var("TWITTER_BEARER_TOKEN") {
            self.bearer_token = Some(token);
        }
        if let Some(key) = var("TWITTER_CONSUMER_KEY") {
            self.consumer_key = Some(key);
        }
        if let Some(secret) = var("TWITTER_CONSUMER_SECRET") {
            self.consumer_secret = Some(secret);
        }
        if let Some(version) = var("TWITTER_API_VERSION") {
            self.api_version = version.parse()?;
        }
        if let Some(base_url) = var("TWITTER_BASE_URL") {
            self.base_url = base_url;
        }
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Credentials to use; a bearer token wins over consumer credentials
    pub fn auth_config(&self) -> Result<AuthConfig> {
        if let Some(token) = &self.bearer_token {
            return Ok(AuthConfig::bearer(token.clone()));
        }

        match (&self.consumer_key, &self.consumer_secret) {
            (Some(key), Some(secret)) => Ok(AuthConfig::app_only(key.clone(), secret.clone())),
            (Some(_), None) => Err(Error::config("consumer_key set without consumer_secret")),
            (None, Some(_)) => Err(Error::config("consumer_secret set without consumer_key")),
            (None, None) => Ok(AuthConfig::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_version, ApiVersion::V2);
        assert_eq!(config.base_url, "https://api.twitter.com");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("twitter-pager/"));
        assert_eq!(config.rate_limit, Some(RateLimiterConfig::default()));
    }

    #[test]
    fn test_from_yaml_str() {
        let config = ClientConfig::from_yaml_str(
            r#"
api_version: "1.1"
bearer_token: AAAA
timeout_secs: 10
rate_limit:
  requests: 180
"#,
        )
        .unwrap();

        assert_eq!(config.api_version, ApiVersion::V1_1);
        assert_eq!(config.bearer_token.as_deref(), Some("AAAA"));
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(
            config.rate_limit,
            Some(RateLimiterConfig {
                requests: 180,
                window_secs: 900
            })
        );
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_rate_limit_can_be_disabled() {
        let config = ClientConfig::from_yaml_str("rate_limit: null\n").unwrap();
        assert_eq!(config.rate_limit, None);
    }

    #[test]
    fn test_from_file_json_and_yaml() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"api_version": "2", "consumer_key": "k", "consumer_secret": "s"}}"#)
            .unwrap();
        let config = ClientConfig::from_file(json.path()).unwrap();
        assert_eq!(config.consumer_key.as_deref(), Some("k"));

        let mut yaml = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(yaml, "base_url: http://localhost:9000").unwrap();
        let config = ClientConfig::from_file(yaml.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_from_file_missing() {
        let err = ClientConfig::from_file("/nonexistent/twitter.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_apply_vars() {
        let vars: HashMap<&str, &str> = [
            ("TWITTER_BEARER_TOKEN", "from-env"),
            ("TWITTER_API_VERSION", "1.1"),
            ("TWITTER_BASE_URL", "http://127.0.0.1:1"),
            ("TWITTER_CONSUMER_KEY", ""),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig {
            consumer_key: Some("kept".to_string()),
            ..ClientConfig::default()
        };
        config
            .apply_vars(|name| vars.get(name).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.bearer_token.as_deref(), Some("from-env"));
        assert_eq!(config.api_version, ApiVersion::V1_1);
        assert_eq!(config.base_url, "http://127.0.0.1:1");
        assert_eq!(config.consumer_key.as_deref(), Some("kept"));
    }

    #[test]
    fn test_apply_vars_rejects_bad_version() {
        let mut config = ClientConfig::default();
        let result = config.apply_vars(|name| {
            (name == "TWITTER_API_VERSION").then(|| "1.0".to_string())
        });
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_auth_config_selection() {
        let mut config = ClientConfig::default();
        assert!(matches!(config.auth_config().unwrap(), AuthConfig::None));

        config.consumer_key = Some("k".to_string());
        assert!(config.auth_config().is_err());

        config.consumer_secret = Some("s".to_string());
        assert!(matches!(
            config.auth_config().unwrap(),
            AuthConfig::AppOnly { .. }
        ));

        config.bearer_token = Some("t".to_string());
        assert!(matches!(
            config.auth_config().unwrap(),
            AuthConfig::Bearer { .. }
        ));
    }
}
