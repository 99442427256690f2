//! Auth configuration types

use std::fmt;

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// Pre-issued bearer token
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Application-only OAuth2: consumer credentials exchanged for a bearer token
    AppOnly {
        /// Consumer (API) key
        consumer_key: String,
        /// Consumer (API) secret
        consumer_secret: String,
    },
}

impl AuthConfig {
    /// Create a bearer token config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Create an application-only config
    pub fn app_only(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self::AppOnly {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthConfig::None => f.write_str("None"),
            AuthConfig::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
            AuthConfig::AppOnly { consumer_key, .. } => f
                .debug_struct("AppOnly")
                .field("consumer_key", consumer_key)
                .finish_non_exhaustive(),
        }
    }
}

/// Bearer token obtained from the token endpoint
#[derive(Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedToken").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(matches!(config, AuthConfig::None));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfig::app_only("key-123", "secret-456");
        let debug = format!("{config:?}");
        assert!(debug.contains("key-123"));
        assert!(!debug.contains("secret-456"));

        let bearer = format!("{:?}", AuthConfig::bearer("AAAA-token"));
        assert!(!bearer.contains("AAAA-token"));
    }
}
