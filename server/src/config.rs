//! Configuration management for the server.

use std::env;
use std::time::Duration;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Redis connection URL (needs the RedisJSON and RediSearch modules)
    pub redis_url: String,
    /// Upper bound on a single engine round-trip
    pub redis_timeout: Duration,
    /// Value for the engine's MINPREFIX setting
    pub search_min_prefix: u32,
    /// Write the sample users at startup
    pub seed_sample_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any name-to-value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let redis_url =
            lookup("REDIS_URL").unwrap_or_else(|| "redis://localhost:6379".to_string());

        let timeout_ms: u64 = lookup("REDIS_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidTimeout)?;
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let search_min_prefix = lookup("SEARCH_MIN_PREFIX")
            .unwrap_or_else(|| "1".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidMinPrefix)?;

        let seed_sample_data = match lookup("SEED_SAMPLE_DATA") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidSeedFlag)?,
            None => true,
        };

        Ok(Self {
            host,
            port,
            redis_url,
            redis_timeout: Duration::from_millis(timeout_ms),
            search_min_prefix,
            seed_sample_data,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("REDIS_TIMEOUT_MS must be a positive number of milliseconds")]
    InvalidTimeout,

    #[error("Invalid SEARCH_MIN_PREFIX value")]
    InvalidMinPrefix,

    #[error("SEED_SAMPLE_DATA must be true or false")]
    InvalidSeedFlag,
}
