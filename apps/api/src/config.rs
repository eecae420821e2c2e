//! API server configuration

use std::env;

use anyhow::{bail, Context, Result};
use recordshelf_shared_config::{get_required_env, CommonConfig, DatabaseConfig, Environment};
use tracing_subscriber::{filter::ParseError, EnvFilter};

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,

    /// True when `DATABASE_URL` was unset and the local default is in use
    pub database_url_defaulted: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production `DATABASE_URL` must be set explicitly; elsewhere a
    /// local default is used.
    pub fn from_env() -> Result<Self> {
        let environment: Environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .parse()
            .unwrap_or_default();

        if environment.is_production() {
            Self::validate_database_url()?;
        }

        let database_url_defaulted = get_required_env("DATABASE_URL").is_err();
        let common = CommonConfig::from_env().context("Failed to load config")?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| parse_origins(&s)),

            database_url_defaulted,
        })
    }

    /// Validate that DATABASE_URL is explicitly set
    fn validate_database_url() -> Result<()> {
        if get_required_env("DATABASE_URL").is_err() {
            bail!(
                "DATABASE_URL environment variable is required in production. \
                 Please set your PostgreSQL connection string."
            );
        }
        Ok(())
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.common.database
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }

    /// Tracing filter from `RUST_LOG`, then `LOG_LEVEL`, then `info`
    pub fn env_filter(&self) -> Result<EnvFilter, ParseError> {
        EnvFilter::try_new(&self.common.log_level)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
