//! services/app/src/error.rs
//!
//! Defines the primary error type for the application shell.

use crate::config::ConfigError;
use daykeep_core::ports::BackendError;

/// The primary error type for the `app` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the backend port.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Represents an error from the underlying HTTP client library.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
