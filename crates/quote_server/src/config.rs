//! Server configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use quote_core::processor::{PriceBand, ProcessorConfig};
use quote_engine::OrchestratorOptions;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid environment: {0}. Must be one of: development, staging, production")]
    InvalidEnvironment(String),

    #[error("Invalid provider URL: {0}. Must start with http:// or https://")]
    InvalidUrl(String),

    #[error("Invalid price band: min {min} exceeds max {max}")]
    InvalidPriceBand { min: f64, max: f64 },

    #[error("Invalid shared deadline: must be greater than zero seconds")]
    InvalidDeadline,

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl Environment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Environment (development, staging, production)
    #[serde(deserialize_with = "deserialize_environment")]
    pub environment: Environment,
    /// Primary pricing provider endpoint
    pub primary_url: String,
    /// Expanded-market pricing provider endpoint
    pub expanded_url: String,
    /// Shared provider deadline in seconds
    pub shared_deadline_secs: u64,
    /// Lowest acceptable quote price, inclusive
    pub price_band_min: f64,
    /// Highest acceptable quote price, inclusive
    pub price_band_max: f64,
    /// Hard upper price cutoff for expanded-tier quotes
    pub expanded_cutoff: f64,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_environment<'de, D>(deserializer: D) -> Result<Environment, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Environment::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            environment: Environment::Development,
            primary_url: "http://localhost:9001/api/pricing".to_string(),
            expanded_url: "http://localhost:9002/api/pricing".to_string(),
            shared_deadline_secs: 90,
            price_band_min: 99.0,
            price_band_max: 101.0,
            expanded_cutoff: 101.0,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Host
        if let Ok(host) = std::env::var("QUOTE_SERVER_HOST") {
            config.host = host;
        }

        // Port
        if let Ok(port_str) = std::env::var("QUOTE_SERVER_PORT") {
            config.port = port_str.parse().map_err(|_| ConfigError::InvalidPort(0))?;
        }

        // Log level
        if let Ok(log_level) = std::env::var("QUOTE_LOG_LEVEL") {
            config.log_level = LogLevel::from_str(&log_level)?;
        }

        // Environment
        if let Ok(env) = std::env::var("QUOTE_ENV") {
            config.environment = Environment::from_str(&env)?;
        }

        // Provider endpoints
        if let Ok(url) = std::env::var("QUOTE_PRIMARY_URL") {
            config.primary_url = url;
        }
        if let Ok(url) = std::env::var("QUOTE_EXPANDED_URL") {
            config.expanded_url = url;
        }

        // Shared deadline
        if let Ok(secs_str) = std::env::var("QUOTE_SHARED_DEADLINE_SECS") {
            config.shared_deadline_secs = secs_str.parse().unwrap_or(90);
        }

        // Price band and cutoff
        if let Ok(min_str) = std::env::var("QUOTE_PRICE_BAND_MIN") {
            config.price_band_min = min_str.parse().unwrap_or(99.0);
        }
        if let Ok(max_str) = std::env::var("QUOTE_PRICE_BAND_MAX") {
            config.price_band_max = max_str.parse().unwrap_or(101.0);
        }
        if let Ok(cutoff_str) = std::env::var("QUOTE_EXPANDED_CUTOFF") {
            config.expanded_cutoff = cutoff_str.parse().unwrap_or(101.0);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }

        for url in [&self.primary_url, &self.expanded_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }

        if self.price_band_min > self.price_band_max {
            return Err(ConfigError::InvalidPriceBand {
                min: self.price_band_min,
                max: self.price_band_max,
            });
        }

        if self.shared_deadline_secs == 0 {
            return Err(ConfigError::InvalidDeadline);
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Result-shaping configuration derived from the price settings
    pub fn processor(&self) -> ProcessorConfig {
        ProcessorConfig {
            band: PriceBand {
                min: self.price_band_min,
                max: self.price_band_max,
            },
            expanded_cutoff: self.expanded_cutoff,
        }
    }

    /// Orchestrator deadline options derived from the deadline settings
    pub fn orchestrator_options(&self) -> OrchestratorOptions {
        OrchestratorOptions {
            shared_deadline: Duration::from_secs(self.shared_deadline_secs),
            primary_deadline: None,
            expanded_deadline: None,
        }
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            if let Ok(level) = LogLevel::from_str(log_level) {
                self.log_level = level;
            }
        }
        if let Some(url) = &cli.primary_url {
            self.primary_url = url.clone();
        }
        if let Some(url) = &cli.expanded_url {
            self.expanded_url = url.clone();
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Primary provider URL override
    pub primary_url: Option<String>,
    /// Expanded provider URL override
    pub expanded_url: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    // Start with defaults or file config
    let mut config = if let Some(config_path) = &cli.config_file {
        ServerConfig::from_file(config_path)?
    } else {
        ServerConfig::default()
    };

    // Override with environment variables
    if let Ok(env_config) = ServerConfig::from_env() {
        // Only override non-default values from env
        if std::env::var("QUOTE_SERVER_HOST").is_ok() {
            config.host = env_config.host;
        }
        if std::env::var("QUOTE_SERVER_PORT").is_ok() {
            config.port = env_config.port;
        }
        if std::env::var("QUOTE_LOG_LEVEL").is_ok() {
            config.log_level = env_config.log_level;
        }
        if std::env::var("QUOTE_ENV").is_ok() {
            config.environment = env_config.environment;
        }
        if std::env::var("QUOTE_PRIMARY_URL").is_ok() {
            config.primary_url = env_config.primary_url;
        }
        if std::env::var("QUOTE_EXPANDED_URL").is_ok() {
            config.expanded_url = env_config.expanded_url;
        }
        if std::env::var("QUOTE_SHARED_DEADLINE_SECS").is_ok() {
            config.shared_deadline_secs = env_config.shared_deadline_secs;
        }
        if std::env::var("QUOTE_PRICE_BAND_MIN").is_ok() {
            config.price_band_min = env_config.price_band_min;
        }
        if std::env::var("QUOTE_PRICE_BAND_MAX").is_ok() {
            config.price_band_max = env_config.price_band_max;
        }
        if std::env::var("QUOTE_EXPANDED_CUTOFF").is_ok() {
            config.expanded_cutoff = env_config.expanded_cutoff;
        }
    }

    // Override with CLI arguments
    config.merge_with_cli(cli);

    // Final validation
    config.validate()?;

    Ok(config)
}
