//! services/app/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::time::Duration;

use daykeep_core::domain::Currency;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub log_level: Level,
    pub preferred_currency: Currency,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_base_url = std::env::var("DAYKEEP_API_URL")
            .map_err(|_| ConfigError::MissingVar("DAYKEEP_API_URL".to_string()))?
            .trim_end_matches('/')
            .to_string();

        let api_token = std::env::var("DAYKEEP_API_TOKEN").ok();

        let timeout_str =
            std::env::var("DAYKEEP_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|e| {
            ConfigError::InvalidValue("DAYKEEP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let currency_str = std::env::var("DAYKEEP_CURRENCY").unwrap_or_else(|_| "PHP".to_string());
        let preferred_currency = Currency::from_string(&currency_str)
            .map_err(|e| ConfigError::InvalidValue("DAYKEEP_CURRENCY".to_string(), e.to_string()))?;

        Ok(Self {
            api_base_url,
            api_token,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level,
            preferred_currency,
        })
    }
}
