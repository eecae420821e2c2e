//! HTTP route handlers for the recordshelf API
//!
//! - Record CRUD endpoints under `/records`
//! - Health check endpoints under `/health`

pub mod health;
pub mod records;

pub use health::{health_router, HealthState};
pub use records::{records_router, RecordsState};

use axum::{routing::get, Router};
use sqlx::PgPool;

use crate::repositories::RecordRepository;
use crate::services::HealthService;

/// Assemble every route over one shared pool
///
/// Layers (tracing, CORS) are added by the caller.
pub fn app_router(pool: PgPool) -> Router {
    let records_state = RecordsState::new(RecordRepository::new(pool.clone()));
    let health_state = HealthState::new(HealthService::new(pool));

    Router::new()
        .route("/", get(root))
        .nest("/records", records_router(records_state))
        .nest("/health", health_router(health_state))
}

async fn root() -> &'static str {
    "recordshelf - record catalogue API"
}
