//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FORMSPREE_ORDER_ENDPOINT` - Form-processing URL that receives orders
//!
//! ## Optional
//! - `BISTRO_HOST` - Bind address (default: 127.0.0.1)
//! - `BISTRO_PORT` - Listen port (default: 3000)
//! - `BISTRO_BASE_URL` - Public URL for the site (default: <http://localhost:3000>)
//! - `BISTRO_MENU_PATH` - Menu YAML file (default: crates/storefront/content/menu.yaml)
//! - `FORMSPREE_RESERVATION_ENDPOINT` - Reservation form URL (default: order endpoint)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_MENU_PATH: &str = "crates/storefront/content/menu.yaml";

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
pub struct BistroConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Menu catalog file
    pub menu_path: PathBuf,
    /// Third-party form endpoints
    pub formspree: FormspreeConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Form-processing endpoints that receive the submitted forms.
#[derive(Debug, Clone)]
pub struct FormspreeConfig {
    /// Endpoint for cart and buy-now orders
    pub order_endpoint: Url,
    /// Endpoint for table reservations
    pub reservation_endpoint: Url,
}

impl FormspreeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let order_endpoint = parse_endpoint(
            "FORMSPREE_ORDER_ENDPOINT",
            &get_required_env("FORMSPREE_ORDER_ENDPOINT")?,
        )?;
        let reservation_endpoint = match get_optional_env("FORMSPREE_RESERVATION_ENDPOINT") {
            Some(value) => parse_endpoint("FORMSPREE_RESERVATION_ENDPOINT", &value)?,
            None => order_endpoint.clone(),
        };
        Ok(Self {
            order_endpoint,
            reservation_endpoint,
        })
    }

    /// Distinct origins of the configured endpoints, for the CSP `form-action`.
    #[must_use]
    pub fn origins(&self) -> Vec<String> {
        let mut origins = vec![self.order_endpoint.origin().ascii_serialization()];
        let reservation = self.reservation_endpoint.origin().ascii_serialization();
        if !origins.contains(&reservation) {
            origins.push(reservation);
        }
        origins
    }
}

impl BistroConfig {
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

        let host = get_env_or_default("BISTRO_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BISTRO_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("BISTRO_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BISTRO_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("BISTRO_BASE_URL", "http://localhost:3000");
        let menu_path = PathBuf::from(get_env_or_default("BISTRO_MENU_PATH", DEFAULT_MENU_PATH));

        let formspree = FormspreeConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            menu_path,
            formspree,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
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
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a sample rate in `0.0..=1.0`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(value) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = value
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

/// Parse an absolute http(s) form endpoint.
fn parse_endpoint(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be an http(s) URL (got scheme '{}')", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must have a host".to_string(),
        ));
    }
    Ok(url)
}
