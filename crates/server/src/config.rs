//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD` - Connection parts.
//!   Used to build the connection string only when `DATABASE_URL` is unset and
//!   all five are present.
//! - `SERVER_HOST` - Bind address (default: 0.0.0.0)
//! - `SERVER_PORT` - Listen port (default: 8080)
//! - `REQUEST_TIMEOUT_SECS` - Per-request deadline in seconds (default: 30, 0 disables)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: &str = "30";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Individual connection settings from `DB_*` variables
    pub database: DatabaseSettings,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Deadline applied to every request; `None` disables it
    pub request_timeout: Option<Duration>,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Connection settings read from the `DB_*` variables.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, Default)]
pub struct DatabaseSettings {
    pub host: Option<String>,
    pub port: Option<String>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<SecretString>,
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ServerConfig {
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseSettings::from_lookup(&lookup);
        let database_url = match lookup("DATABASE_URL") {
            Some(value) => SecretString::from(value),
            None => database
                .connection_url()?
                .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
        };

        let host = get_or_default(&lookup, "SERVER_HOST", DEFAULT_HOST)
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SERVER_HOST".to_string(), e.to_string()))?;
        let port = get_or_default(&lookup, "SERVER_PORT", DEFAULT_PORT)
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SERVER_PORT".to_string(), e.to_string()))?;
        let timeout_secs =
            get_or_default(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)
                .parse::<u64>()
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
                })?;
        let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::InvalidEnvVar("LOG_FORMAT".to_string(), e))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            database_url,
            database,
            host,
            port,
            request_timeout,
            log_format,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseSettings {
    fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("DB_HOST"),
            port: lookup("DB_PORT"),
            name: lookup("DB_NAME"),
            user: lookup("DB_USER"),
            password: lookup("DB_PASSWORD").map(SecretString::from),
        }
    }

    /// Build a `postgres://` URL from the individual settings.
    ///
    /// Returns `Ok(None)` unless every setting is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a setting cannot be placed in a URL.
    pub fn connection_url(&self) -> Result<Option<SecretString>, ConfigError> {
        let (Some(host), Some(port), Some(name), Some(user), Some(password)) = (
            &self.host,
            &self.port,
            &self.name,
            &self.user,
            &self.password,
        ) else {
            return Ok(None);
        };

        let port = port
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("DB_PORT".to_string(), e.to_string()))?;

        let mut url = Url::parse("postgres://localhost")
            .map_err(|e| ConfigError::InvalidEnvVar("DB_HOST".to_string(), e.to_string()))?;
        url.set_host(Some(host))
            .map_err(|e| ConfigError::InvalidEnvVar("DB_HOST".to_string(), e.to_string()))?;
        url.set_port(Some(port))
            .map_err(|()| invalid_url_part("DB_PORT"))?;
        url.set_username(user)
            .map_err(|()| invalid_url_part("DB_USER"))?;
        url.set_password(Some(password.expose_secret()))
            .map_err(|()| invalid_url_part("DB_PASSWORD"))?;
        url.set_path(name);

        Ok(Some(SecretString::from(url.to_string())))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn invalid_url_part(key: &str) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), "cannot be used in a URL".to_string())
}
