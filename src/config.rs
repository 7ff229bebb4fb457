//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines constants for
//! HTTP cache headers, request budgets, shutdown timing, logging and default
//! paths. Every section is optional; a missing key falls back to its default.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Account listings - the dataset is immutable for the life of the process
pub const HTTP_CACHE_ACCOUNTS_MAX_AGE: u32 = 60;

/// Error responses - short TTL so a transient failure is not pinned upstream
pub const HTTP_CACHE_ERROR_MAX_AGE: u32 = 5;

pub const CACHE_CONTROL_ACCOUNTS: &str =
    formatcp!("public, max-age={}", HTTP_CACHE_ACCOUNTS_MAX_AGE);

pub const CACHE_CONTROL_ERROR: &str = formatcp!("public, max-age={}", HTTP_CACHE_ERROR_MAX_AGE);

// =============================================================================
// Request Budget and Shutdown
// =============================================================================

/// Processing timeout per request, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Deadline of the per-request context, in seconds
pub const DEFAULT_CONTEXT_TIMEOUT_SECS: u64 = 60;

/// How long in-flight requests may drain after a shutdown signal, in seconds
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 60;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default listen address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 5200;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "accounts_api=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Per-request processing budget
    #[serde(default)]
    pub handler: HandlerConfig,
    #[serde(default)]
    pub shutdown: ShutdownConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandlerConfig {
    /// Timer after which a pending request is answered with a timeout error
    #[serde(default = "HandlerConfig::default_timeout")]
    pub timeout_seconds: u64,
    /// Deadline after which a pending request is answered with an internal error
    #[serde(default = "HandlerConfig::default_context_timeout")]
    pub context_timeout_seconds: u64,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: Self::default_timeout(),
            context_timeout_seconds: Self::default_context_timeout(),
        }
    }
}

impl HandlerConfig {
    fn default_timeout() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    fn default_context_timeout() -> u64 {
        DEFAULT_CONTEXT_TIMEOUT_SECS
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn context_timeout(&self) -> Duration {
        Duration::from_secs(self.context_timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShutdownConfig {
    #[serde(default = "ShutdownConfig::default_grace_period")]
    pub grace_period_seconds: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_seconds: Self::default_grace_period(),
        }
    }
}

impl ShutdownConfig {
    fn default_grace_period() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_seconds)
    }
}

/// Account data source
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// JSON file with an array of accounts. Uses the built-in seed list when unset.
    pub seed_file: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.handler.timeout_seconds == 0 || self.handler.context_timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "handler.timeout_seconds and handler.context_timeout_seconds must be non-zero"
                    .to_string(),
            ));
        }

        if !matches!(self.logging.format.to_ascii_lowercase().as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
