//! Configuration management for the back-office dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with RBO__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Remote back-office API
    pub api: ApiConfig,

    /// Query cache configuration
    pub cache: CacheConfig,

    /// Log output configuration
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL every resource path is joined onto
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// How long a fetched list or document is served without refetching
    pub ttl_secs: u64,

    /// Maximum number of cached responses
    pub max_entries: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogConfig {
    /// Emit JSON log lines instead of the human-readable format
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RBO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("api.base_url", "http://localhost:5000/api")?
            .set_default("api.timeout_secs", 15)?
            .set_default("cache.ttl_secs", 30)?
            .set_default("cache.max_entries", 1000)?
            .set_default("log.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RBO__ prefix)
            .add_source(
                Environment::with_prefix("RBO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Configuration pointing at a given API, used by tests and tooling
    pub fn for_api(base_url: impl Into<String>) -> Self {
        Self {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            api: ApiConfig {
                base_url: base_url.into(),
                timeout_secs: 5,
            },
            cache: CacheConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 30,
            max_entries: 1000,
        }
    }
}
