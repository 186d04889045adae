//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The loaded [`Config`] is passed by value into the server state; there is no
//! process-wide configuration singleton.

use crate::error::{AppError, Result};
use lib_utils::{get_env_or, get_env_parse_or};
use std::time::Duration;

/// Default address of the AI inference service.
pub const DEFAULT_AI_SERVICE_URL: &str = "http://llm-service:5000";

/// Upper bound for `HISTORY_TTL_DAYS` (about a century).
pub const MAX_HISTORY_TTL_DAYS: u64 = 36_500;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Which backend stores the per-user chat history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheDriver {
    /// Process-local map, lost on restart
    Memory,
    /// SQLite table with an expiration column
    Database,
}

impl CacheDriver {
    pub fn parse(value: &str) -> std::result::Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "memory" | "array" => Ok(CacheDriver::Memory),
            "database" | "sqlite" => Ok(CacheDriver::Database),
            other => Err(format!(
                "CACHE_DRIVER must be one of: memory, database (got '{}')",
                other
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheDriver::Memory => "memory",
            CacheDriver::Database => "database",
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the AI service, without a trailing slash
    pub ai_service_url: String,

    /// Timeout for a single call to the AI service, in seconds
    ///
    /// Valid range: 1-300
    pub ai_timeout_secs: u64,

    /// Storage backend for chat history
    pub cache_driver: CacheDriver,

    /// SQLite connection URL, only used by [`CacheDriver::Database`]
    pub database_url: String,

    /// Maximum number of records kept per user
    pub history_limit: usize,

    /// Days a history survives after its last write
    pub history_ttl_days: u64,

    /// Directory served under `/static`
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_service_url: DEFAULT_AI_SERVICE_URL.to_string(),
            ai_timeout_secs: 30,
            cache_driver: CacheDriver::Memory,
            database_url: "sqlite:data/cache.db".to_string(),
            history_limit: 100,
            history_ttl_days: 7,
            static_dir: "static".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when a variable is malformed or out of range.
    pub fn load() -> Result<Self> {
        Self::from_env().map_err(AppError::Config)?.validated()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> std::result::Result<Self, String> {
        let defaults = Config::default();

        let ai_service_url = get_env_or("AI_SERVICE_URL", &defaults.ai_service_url)
            .trim()
            .trim_end_matches('/')
            .to_string();

        let ai_timeout_secs = get_env_parse_or("AI_SERVICE_TIMEOUT_SECS", defaults.ai_timeout_secs)
            .map_err(|e| format!("AI_SERVICE_TIMEOUT_SECS must be a valid number: {}", e))?;

        let cache_driver = CacheDriver::parse(&get_env_or("CACHE_DRIVER", defaults.cache_driver.as_str()))?;

        let database_url = get_env_or("DATABASE_URL", &defaults.database_url);

        let history_limit = get_env_parse_or("HISTORY_LIMIT", defaults.history_limit)
            .map_err(|e| format!("HISTORY_LIMIT must be a valid number: {}", e))?;

        let history_ttl_days = get_env_parse_or("HISTORY_TTL_DAYS", defaults.history_ttl_days)
            .map_err(|e| format!("HISTORY_TTL_DAYS must be a valid number: {}", e))?;

        let static_dir = get_env_or("STATIC_DIR", &defaults.static_dir);

        Ok(Self {
            ai_service_url,
            ai_timeout_secs,
            cache_driver,
            database_url,
            history_limit,
            history_ttl_days,
            static_dir,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.ai_service_url.starts_with("http://") || self.ai_service_url.starts_with("https://")) {
            return Err(format!(
                "AI_SERVICE_URL must start with http:// or https:// (got '{}')",
                self.ai_service_url
            ));
        }

        if self.ai_timeout_secs < 1 || self.ai_timeout_secs > 300 {
            return Err("AI_SERVICE_TIMEOUT_SECS must be between 1 and 300".to_string());
        }

        if self.history_limit < 1 {
            return Err("HISTORY_LIMIT must be at least 1".to_string());
        }

        if self.history_ttl_days < 1 {
            return Err("HISTORY_TTL_DAYS must be at least 1".to_string());
        }

        if self.history_ttl_days > MAX_HISTORY_TTL_DAYS {
            return Err(format!(
                "HISTORY_TTL_DAYS must not exceed {} (got {})",
                MAX_HISTORY_TTL_DAYS, self.history_ttl_days
            ));
        }

        if self.cache_driver == CacheDriver::Database && !self.database_url.starts_with("sqlite:") {
            return Err("DATABASE_URL must be a sqlite: URL when CACHE_DRIVER=database".to_string());
        }

        Ok(())
    }

    /// [`Config::validate`], with failures as [`AppError::Config`].
    pub fn validated(self) -> Result<Self> {
        self.validate().map_err(AppError::Config)?;
        Ok(self)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    pub fn history_ttl(&self) -> Duration {
        let secs = self
            .history_ttl_days
            .checked_mul(SECS_PER_DAY)
            .unwrap_or(MAX_HISTORY_TTL_DAYS * SECS_PER_DAY);
        Duration::from_secs(secs)
    }
}

// endregion: --- Tests
