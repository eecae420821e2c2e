//! Configuration error types

use thiserror::Error;

/// Errors raised while loading configuration at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is unset or empty
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but does not parse
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Connection URL has the wrong scheme or shape
    #[error("invalid URL format for {0}: {1}")]
    InvalidUrl(String, String),

    /// Values parse individually but are inconsistent together
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
