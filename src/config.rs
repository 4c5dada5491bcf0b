//! # Configuration Module
//!
//! Configuration structures for the recipe directory client, the recipe
//! proxy client and the suggestion scorer. Defaults live in `Default` impls;
//! [`AppConfig::from_env`] overrides them from the environment (and `.env`).

use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_MEALDB_URL: &str = "https://www.themealdb.com/api/json/v1/1";
pub const DEFAULT_RECIPE_PROXY_URL: &str = "https://pantry-recipe-proxy.workers.dev";
pub const DEFAULT_KEY_INGREDIENTS: usize = 5;
pub const DEFAULT_MAX_CANDIDATES: usize = 10;

/// Retry and circuit breaker settings for outbound lookups
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
    /// Consecutive failures before the circuit opens
    pub circuit_breaker_threshold: u32,
    /// Seconds the circuit stays open
    pub circuit_breaker_reset_secs: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_retry_delay_ms: 250,
            max_retry_delay_ms: 2000,
            circuit_breaker_threshold: 5,
            circuit_breaker_reset_secs: 30,
        }
    }
}

/// Settings for an HTTP lookup client
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    pub recovery: RecoveryConfig,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MEALDB_URL.to_string(),
            request_timeout_secs: 10,
            recovery: RecoveryConfig::default(),
        }
    }
}

impl DirectoryConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Fan-out bounds for the two-stage suggestion scorer
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// Pantry items used to seed the coarse round
    pub key_ingredient_limit: usize,
    /// Candidates kept for the fine round (bounds detail lookups)
    pub candidate_limit: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            key_ingredient_limit: DEFAULT_KEY_INGREDIENTS,
            candidate_limit: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// Top-level configuration for the binary
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub directory: DirectoryConfig,
    pub proxy: DirectoryConfig,
    pub suggest: SuggestConfig,
}

impl AppConfig {
    /// Load configuration from the environment, after reading `.env` if present
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self {
            proxy: DirectoryConfig::with_base_url(DEFAULT_RECIPE_PROXY_URL),
            ..Default::default()
        };

        if let Ok(url) = env::var("PANTRY_MEALDB_URL") {
            config.directory.base_url = url;
        }
        if let Ok(url) = env::var("PANTRY_RECIPE_PROXY_URL") {
            config.proxy.base_url = url;
        }

        let timeout = env_or("PANTRY_HTTP_TIMEOUT_SECS", config.directory.request_timeout_secs);
        let retries = env_or("PANTRY_MAX_RETRIES", config.directory.recovery.max_retries);
        for client in [&mut config.directory, &mut config.proxy] {
            client.request_timeout_secs = timeout;
            client.recovery.max_retries = retries;
        }

        config.suggest.key_ingredient_limit =
            env_or("PANTRY_KEY_INGREDIENTS", config.suggest.key_ingredient_limit);
        config.suggest.candidate_limit = env_or("PANTRY_MAX_CANDIDATES", config.suggest.candidate_limit);

        config
    }
}

/// Parse an environment variable, keeping `default` when it is unset or invalid
fn env_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %value, default = %default, "Invalid configuration value, using default");
            default
        }),
        Err(_) => default,
    }
}
