//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FALCON_HOST` - Bind address (default: 127.0.0.1)
//! - `FALCON_PORT` - Listen port (default: 3000)
//! - `FALCON_API_BASE_URL` - Catalog REST API base URL (default: <http://127.0.0.1:8000/api/v1>)
//! - `FALCON_API_TIMEOUT_SECS` - Catalog request timeout in seconds (default: 10)
//! - `FALCON_DATA_DIR` - Directory holding the persisted cart (default: .falcon)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
const DEFAULT_API_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog REST API configuration
    pub catalog: CatalogConfig,
    /// Directory for the file-backed cart storage
    pub data_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Catalog REST API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL without trailing slash (e.g., `http://127.0.0.1:8000/api/v1`)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        Ok(Self {
            host: env.parse_or("FALCON_HOST", "127.0.0.1")?,
            port: env.parse_or("FALCON_PORT", "3000")?,
            catalog: CatalogConfig::from_env(&env)?,
            data_dir: PathBuf::from(env.or_default("FALCON_DATA_DIR", ".falcon")),
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let raw = env.or_default("FALCON_API_BASE_URL", DEFAULT_API_BASE_URL);
        let url = Url::parse(&raw).map_err(|e| {
            ConfigError::InvalidEnvVar("FALCON_API_BASE_URL".to_string(), e.to_string())
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "FALCON_API_BASE_URL".to_string(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        let timeout_secs: u64 = env.parse_or("FALCON_API_TIMEOUT_SECS", DEFAULT_API_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "FALCON_API_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with typed accessors.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.catalog.base_url, "http://127.0.0.1:8000/api/v1");
        assert_eq!(config.catalog.timeout, Duration::from_secs(10));
        assert_eq!(config.data_dir, PathBuf::from(".falcon"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FALCON_HOST", "0.0.0.0"),
            ("FALCON_PORT", "8080"),
            ("FALCON_API_BASE_URL", "https://shop.example.com/api/v1/"),
            ("FALCON_API_TIMEOUT_SECS", "3"),
            ("FALCON_DATA_DIR", "/var/lib/falcon"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.catalog.base_url, "https://shop.example.com/api/v1");
        assert_eq!(config.catalog.timeout, Duration::from_secs(3));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/falcon"));
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("FALCON_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("FALCON_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "FALCON_PORT"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = config_from(&[("FALCON_API_BASE_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));

        let err = config_from(&[("FALCON_API_BASE_URL", "ftp://example.com")]).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = config_from(&[("FALCON_API_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));
    }
}
