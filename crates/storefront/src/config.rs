//! # Configuration
//!
//! Settings are read from `STOREFRONT_*` environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `STOREFRONT_BASE_URL` | `http://localhost:3000` | Root of the catalog service |
//! | `STOREFRONT_TIMEOUT_SECS` | `30` | Per-request timeout |
//! | `STOREFRONT_BUFFER_SIZE` | `32` | Store request queue depth |

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const ENV_PREFIX: &str = "STOREFRONT_";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment: {0}")]
    Env(String),

    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("STOREFRONT_BUFFER_SIZE must be at least 1")]
    ZeroBufferSize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_buffer_size() -> usize {
    crate::store::DEFAULT_BUFFER_SIZE
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl StorefrontConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .map_err(|e| ConfigError::Env(e.to_string()))?
            .checked()?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Reads an explicit set of variables instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| ConfigError::Env(e.to_string()))?;
        config.checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        Ok(self)
    }

    /// The parsed catalog root.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorefrontConfig::from_vars(Vec::new()).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.endpoint().unwrap().as_str(), "http://localhost:3000/");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_reads_prefixed_vars() {
        let config = StorefrontConfig::from_vars(vars(&[
            ("STOREFRONT_BASE_URL", "https://shop.test/api"),
            ("STOREFRONT_TIMEOUT_SECS", "5"),
            ("STOREFRONT_BUFFER_SIZE", "4"),
            ("BASE_URL", "http://ignored"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://shop.test/api");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.buffer_size, 4);
    }

    #[test]
    fn test_bad_number_is_env_error() {
        let result = StorefrontConfig::from_vars(vars(&[("STOREFRONT_TIMEOUT_SECS", "soon")]));
        assert!(matches!(result, Err(ConfigError::Env(_))));
    }

    #[test]
    fn test_zero_buffer_size_is_rejected() {
        let result = StorefrontConfig::from_vars(vars(&[("STOREFRONT_BUFFER_SIZE", "0")]));
        assert_eq!(result, Err(ConfigError::ZeroBufferSize));
    }

    #[test]
    fn test_endpoint_rejects_unusable_urls() {
        let config = StorefrontConfig {
            base_url: "not a url".to_string(),
            ..StorefrontConfig::default()
        };
        assert!(matches!(
            config.endpoint(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        let config = StorefrontConfig {
            base_url: "ftp://files.test".to_string(),
            ..StorefrontConfig::default()
        };
        assert!(matches!(
            config.endpoint(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
