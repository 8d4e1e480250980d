//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `UCOOK_SETTLE_DELAY_MS` - Delay between a swipe and the next card (default: 300)
//! - `UCOOK_CATALOG_PATH` - YAML dish catalog (default: built-in catalog)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry event sample rate, 0.0-1.0 (default: 1.0)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default settle delay between gesture resolution and advancing to the next dish.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// U-COOK application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Delay before a swiped card is replaced by the next one
    pub settle_delay: Duration,
    /// Catalog file to load instead of the built-in dishes
    pub catalog_path: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            catalog_path: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let settle_ms = get_or_default(&lookup, "UCOOK_SETTLE_DELAY_MS", "300")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("UCOOK_SETTLE_DELAY_MS".to_string(), e.to_string())
            })?;

        let catalog_path = get_optional(&lookup, "UCOOK_CATALOG_PATH").map(PathBuf::from);
        let sentry_dsn = get_optional(&lookup, "SENTRY_DSN");
        let sentry_environment = get_optional(&lookup, "SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_sample_rate(&get_or_default(
            &lookup,
            "SENTRY_SAMPLE_RATE",
            "1.0",
        ))?;

        Ok(Self {
            settle_delay: Duration::from_millis(settle_ms),
            catalog_path,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating empty values as unset.
fn get_optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Parse and range-check the Sentry sample rate.
fn parse_sample_rate(value: &str) -> Result<f32, ConfigError> {
    let rate = value.parse::<f32>().map_err(|e| {
        ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), e.to_string())
    })?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            "SENTRY_SAMPLE_RATE".to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}
