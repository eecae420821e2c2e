//! Health check service for verifying the database dependency
//!
//! The readiness probe reuses the shared pool rather than opening a new
//! connection, so it reports exactly what request handlers would see.

use serde::Serialize;
use sqlx::PgPool;
use std::time::{Duration, Instant};

use crate::db;
use crate::repositories::RecordRepository;

/// Status of the database dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Database answered the ping
    Healthy,
    /// Database is unreachable or failed the ping
    Unhealthy,
}

/// Pool statistics gathered after a successful ping
#[derive(Debug, Clone, Serialize)]
pub struct PoolDetails {
    pub pool_size: u32,
    pub idle_connections: usize,
    /// Null when the records table cannot be counted
    pub record_count: Option<i64>,
}

/// Result of the database health check
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseHealth {
    pub status: ServiceStatus,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<PoolDetails>,
}

impl DatabaseHealth {
    fn healthy(response_time: Duration, details: PoolDetails) -> Self {
        Self {
            status: ServiceStatus::Healthy,
            response_time_ms: response_time.as_millis() as u64,
            error: None,
            details: Some(details),
        }
    }

    fn unhealthy(error: impl Into<String>, response_time: Duration) -> Self {
        Self {
            status: ServiceStatus::Unhealthy,
            response_time_ms: response_time.as_millis() as u64,
            error: Some(error.into()),
            details: None,
        }
    }
}

/// Readiness response body
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    /// Mirrors the database status
    pub status: ServiceStatus,
    pub database: DatabaseHealth,
    /// API version
    pub version: &'static str,
}

impl HealthCheckResponse {
    pub fn new(database: DatabaseHealth) -> Self {
        Self {
            status: database.status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Check if overall health is good
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

/// Health check service
#[derive(Clone)]
pub struct HealthService {
    pool: PgPool,
}

impl HealthService {
    /// Create a health service over the shared pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ping the database through the shared pool
    ///
    /// The ping alone decides readiness; a failed count only nulls
    /// `record_count`.
    pub async fn check_database(&self) -> DatabaseHealth {
        let start = Instant::now();

        match db::ping(&self.pool).await {
            Ok(()) => {
                let record_count = RecordRepository::new(self.pool.clone()).count().await.ok();
                DatabaseHealth::healthy(
                    start.elapsed(),
                    PoolDetails {
                        pool_size: self.pool.size(),
                        idle_connections: self.pool.num_idle(),
                        record_count,
                    },
                )
            }
            Err(e) => DatabaseHealth::unhealthy(format!("Ping failed: {}", e), start.elapsed()),
        }
    }

    /// Build the readiness response
    pub async fn check(&self) -> HealthCheckResponse {
        let database = self.check_database().await;

        if database.status == ServiceStatus::Unhealthy {
            tracing::warn!(error = ?database.error, "Readiness check failed");
        }

        HealthCheckResponse::new(database)
    }
}
