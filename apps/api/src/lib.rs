//! recordshelf API library
//!
//! Exposes the API components so the binary and the integration tests build
//! the exact same router.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::app_router;
