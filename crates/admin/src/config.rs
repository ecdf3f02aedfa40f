//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_BASE_URL` - Public URL for the back office (default: `http://localhost:<port>`)
//! - `ADMIN_STAFF_EMAIL_DOMAIN` - Domain staff emails must use (default: metropolia.fi)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sentry sampling

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;
use your_slice_core::credentials::DEFAULT_STAFF_DOMAIN;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Staff emails must end with `@` followed by this domain
    pub staff_email_domain: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Lookup(lookup);

        let host = env.parse_or("ADMIN_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("ADMIN_PORT", 3001_u16)?;
        let base_url = env
            .optional("ADMIN_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_BASE_URL".to_string(), e.to_string()))?;

        let staff_email_domain = env
            .optional("ADMIN_STAFF_EMAIL_DOMAIN")
            .map_or_else(|| DEFAULT_STAFF_DOMAIN.to_string(), |d| {
                d.trim().trim_start_matches('@').to_ascii_lowercase()
            });
        if !staff_email_domain.contains('.') {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_STAFF_EMAIL_DOMAIN".to_string(),
                format!("expected a domain such as {DEFAULT_STAFF_DOMAIN}, got {staff_email_domain}"),
            ));
        }

        Ok(Self {
            host,
            port,
            base_url,
            staff_email_domain,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.1)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies must be marked secure.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            staff_email_domain: DEFAULT_STAFF_DOMAIN.to_string(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AdminConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AdminConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.staff_email_domain, "metropolia.fi");
        assert!(!config.is_https());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_staff_domain_is_normalized() {
        let config = load(&[("ADMIN_STAFF_EMAIL_DOMAIN", " @YourSlice.FI ")]).unwrap();
        assert_eq!(config.staff_email_domain, "yourslice.fi");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("ADMIN_PORT", "lots")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "ADMIN_PORT"
        ));
        assert!(load(&[("ADMIN_STAFF_EMAIL_DOMAIN", "localhost")]).is_err());
        assert!(load(&[("ADMIN_BASE_URL", "not a url")]).is_err());
    }

    #[test]
    fn test_https_base_url() {
        let config = load(&[("ADMIN_BASE_URL", "https://admin.yourslice.fi")]).unwrap();
        assert!(config.is_https());
    }
}
