//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. Command-line flags (see `main.rs`) override the environment via
//! [`ConfigOverrides`].
//!
//! ## Required Variables
//!
//! - `BASE_URL` - Base URL for links, e.g. `https://mtrx.to/`
//! - `SECRET` - Shared secret that create requests must carry
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `LENGTH_LIMIT` - Max length of URLs being shortened, `<= 0` means no limit (default: 256)
//! - `SQLITE_DB` - Path to the SQLite database (default: `smallifier.db`)
//! - `METRICS_LISTEN` - Bind address for the Prometheus metrics listener (default: disabled)
//! - `FOLLOW_QUEUE_CAPACITY` - Follow event buffer size (default: 1048576)
//! - `MAX_GENERATION_ATTEMPTS` - Attempts per short path generation (default: 30)
//! - `SHUTDOWN_DRAIN_TIMEOUT` - Seconds to wait for queued follows on shutdown (default: 10)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::application::services::DEFAULT_MAX_ATTEMPTS;

pub const DEFAULT_FOLLOW_QUEUE_CAPACITY: usize = 1024 * 1024;
pub const DEFAULT_LENGTH_LIMIT: i64 = 256;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub listen_addr: String,
    pub secret: String,
    /// Maximum `long_url` length in bytes. `<= 0` disables the check.
    pub length_limit: i64,
    pub sqlite_db: String,
    pub metrics_addr: Option<String>,
    pub log_level: String,
    pub log_format: String,
    pub follow_queue_capacity: usize,
    pub max_generation_attempts: usize,
    pub shutdown_drain_timeout: u64,
    pub db_max_connections: u32,
    pub db_connect_timeout: u64,
}

/// Values that take priority over the environment, typically from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub listen_addr: Option<String>,
    pub secret: Option<String>,
    pub length_limit: Option<i64>,
    pub sqlite_db: Option<String>,
    pub metrics_addr: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `BASE_URL` or `SECRET` is missing, or `BASE_URL`
    /// is not a valid URL.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(&ConfigOverrides::default())
    }

    /// Loads configuration from environment variables, preferring any value
    /// set in `overrides`.
    pub fn from_env_with(overrides: &ConfigOverrides) -> Result<Self> {
        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| env::var("BASE_URL").ok())
            .context("BASE_URL must be set")?;
        let base_url =
            Url::parse(&base_url).with_context(|| format!("BASE_URL is not a valid URL: {base_url}"))?;

        let secret = overrides
            .secret
            .clone()
            .or_else(|| env::var("SECRET").ok())
            .context("SECRET must be set")?;

        let listen_addr = overrides
            .listen_addr
            .clone()
            .or_else(|| env::var("LISTEN").ok())
            .unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let length_limit = overrides
            .length_limit
            .unwrap_or_else(|| parse_env("LENGTH_LIMIT", DEFAULT_LENGTH_LIMIT));

        let sqlite_db = overrides
            .sqlite_db
            .clone()
            .or_else(|| env::var("SQLITE_DB").ok())
            .unwrap_or_else(|| "smallifier.db".to_string());

        let metrics_addr = overrides
            .metrics_addr
            .clone()
            .or_else(|| env::var("METRICS_LISTEN").ok())
            .filter(|addr| !addr.is_empty());

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            base_url,
            listen_addr,
            secret,
            length_limit,
            sqlite_db,
            metrics_addr,
            log_level,
            log_format,
            follow_queue_capacity: parse_env("FOLLOW_QUEUE_CAPACITY", DEFAULT_FOLLOW_QUEUE_CAPACITY),
            max_generation_attempts: parse_env("MAX_GENERATION_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            shutdown_drain_timeout: parse_env("SHUTDOWN_DRAIN_TIMEOUT", 10),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 5),
            db_connect_timeout: parse_env("DB_CONNECT_TIMEOUT", 30),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `secret` is empty
    /// - `base_url` is not an absolute `http`/`https` URL
    /// - `listen_addr` or `metrics_addr` is not `host:port`
    /// - a queue, attempt, pool, or timeout setting is out of range
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            anyhow::bail!("SECRET must not be empty");
        }

        if !matches!(self.base_url.scheme(), "http" | "https") || self.base_url.cannot_be_a_base()
        {
            anyhow::bail!(
                "BASE_URL must be an absolute http:// or https:// URL, got '{}'",
                self.base_url
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref metrics_addr) = self.metrics_addr
            && !metrics_addr.contains(':')
        {
            anyhow::bail!(
                "METRICS_LISTEN must be in format 'host:port', got '{}'",
                metrics_addr
            );
        }

        if self.follow_queue_capacity == 0 || self.follow_queue_capacity > 16 * 1024 * 1024 {
            anyhow::bail!(
                "FOLLOW_QUEUE_CAPACITY must be between 1 and 16777216, got {}",
                self.follow_queue_capacity
            );
        }

        if self.max_generation_attempts == 0 || self.max_generation_attempts > 1000 {
            anyhow::bail!(
                "MAX_GENERATION_ATTEMPTS must be between 1 and 1000, got {}",
                self.max_generation_attempts
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.sqlite_db.is_empty() {
            anyhow::bail!("SQLITE_DB must not be empty");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Path prefix under which short paths live, e.g. `/` or `/l/`.
    pub fn base_path(&self) -> &str {
        self.base_url.path()
    }

    /// Length limit for `long_url`, or `None` when disabled.
    pub fn length_limit(&self) -> Option<usize> {
        usize::try_from(self.length_limit).ok().filter(|&n| n > 0)
    }

    pub fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout)
    }

    pub fn shutdown_drain_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_drain_timeout)
    }

    /// Prints configuration summary (without the secret).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.sqlite_db);

        match self.length_limit() {
            Some(limit) => tracing::info!("  Length limit: {}", limit),
            None => tracing::info!("  Length limit: none"),
        }

        if let Some(ref metrics_addr) = self.metrics_addr {
            tracing::info!("  Metrics: {} (enabled)", metrics_addr);
        } else {
            tracing::info!("  Metrics: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Follow queue capacity: {}", self.follow_queue_capacity);
        tracing::info!("  Max generation attempts: {}", self.max_generation_attempts);
    }
}

/// Reads `key` and parses it, falling back to `default` when unset or invalid.
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env(overrides: &ConfigOverrides) -> Result<Config> {
    let config = Config::from_env_with(overrides)?;
    config.validate()?;
    Ok(config)
}
