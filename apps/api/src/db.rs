//! Database connection setup
//!
//! Opens the shared Postgres pool at startup and proves it works with a
//! ping. There is no retry: if either step fails the caller is expected to
//! abort startup.

use std::time::Duration;

use recordshelf_shared_config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

/// Errors raised while establishing the shared pool
#[derive(Error, Debug)]
pub enum ConnectError {
    /// The pool could not open its first connection
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Connected, but the liveness query failed
    #[error("database ping failed: {0}")]
    Ping(#[source] sqlx::Error),
}

/// Build pool options from configuration
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
}

/// Connect to the database and verify it answers
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, ConnectError> {
    tracing::info!(
        max_connections = config.max_connections,
        "Connecting to database..."
    );

    let pool = match pool_options(config).connect(&config.url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Database connection failed");
            return Err(ConnectError::Connect(e));
        }
    };

    if let Err(e) = ping(&pool).await {
        tracing::error!(error = %e, "Database ping failed");
        return Err(ConnectError::Ping(e));
    }

    tracing::info!("Database connection established");
    Ok(pool)
}

/// Run a trivial query against the pool
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}
