//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `HEXCART_API_PATH` - Shop identifier used in every cart API path
//!
//! ## Optional
//! - `HEXCART_API_BASE` - Cart API base URL (default: <https://livejs-api.hexschool.io/api/livejs/v1>)
//! - `HEXCART_HOST` - Bind address (default: 127.0.0.1)
//! - `HEXCART_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Default base URL of the LiveJS cart service.
pub const DEFAULT_API_BASE: &str = "https://livejs-api.hexschool.io/api/livejs/v1";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
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
    /// Remote cart API configuration
    pub api: ApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Remote cart API location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Customer endpoint root, always ending in `/` so relative joins append.
    pub endpoint: Url,
}

impl ApiConfig {
    /// Build the customer endpoint for a shop under `base`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base` is not an absolute URL
    /// or `api_path` is empty.
    pub fn new(base: &str, api_path: &str) -> Result<Self, ConfigError> {
        if api_path.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "HEXCART_API_PATH".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let raw = format!(
            "{}/customer/{}/",
            base.trim_end_matches('/'),
            urlencoding::encode(api_path.trim())
        );
        let endpoint = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("HEXCART_API_BASE".to_string(), e.to_string()))?;

        if endpoint.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "HEXCART_API_BASE".to_string(),
                "must be an absolute http(s) URL".to_string(),
            ));
        }

        Ok(Self { endpoint })
    }

    /// Load the API location from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the shop identifier is missing or the base URL
    /// is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let base = get_env_or_default("HEXCART_API_BASE", DEFAULT_API_BASE);
        let api_path = get_required_env("HEXCART_API_PATH")?;
        Self::new(&base, &api_path)
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("HEXCART_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HEXCART_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("HEXCART_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("HEXCART_PORT".to_string(), e.to_string()))?;

        let api = ApiConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            api,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
