//! Test helper functions for API integration tests
//!
//! Database-backed tests run against a throwaway Postgres schema so they can
//! run in parallel and still assert on an empty table.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

use recordshelf_api::app_router;

use super::fixtures::{DEFAULT_TEST_DATABASE_URL, RECORDS_SCHEMA, UNREACHABLE_DATABASE_URL};

/// Skip the current test when no database is reachable
#[macro_export]
macro_rules! require_db {
    ($db_var:ident) => {
        let $db_var = match $crate::common::TestDb::try_new().await {
            Some(db) => db,
            None => {
                eprintln!("Skipping test: database not available");
                return;
            }
        };
    };
}

/// Database URL for tests
pub fn test_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string())
}

/// An isolated schema holding a fresh `records` table
pub struct TestDb {
    /// Pool whose connections all use the test schema
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    /// Create a schema and table, or `None` if Postgres is unreachable
    pub async fn try_new() -> Option<Self> {
        let url = test_database_url();

        let admin = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&url)
            .await
            .ok()?;

        let schema = format!("recordshelf_test_{}", Uuid::new_v4().simple());
        admin
            .execute(format!("CREATE SCHEMA {}", schema).as_str())
            .await
            .expect("Failed to create test schema");

        let search_path = schema.clone();
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .after_connect(move |conn, _meta| {
                let sql = format!("SET search_path TO {}", search_path);
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await
            .expect("Failed to connect test pool");

        sqlx::raw_sql(RECORDS_SCHEMA)
            .execute(&pool)
            .await
            .expect("Failed to create records table");

        Some(Self {
            pool,
            admin,
            schema,
        })
    }

    /// Router over this database
    pub fn app(&self) -> Router {
        app_router(self.pool.clone())
    }

    /// Number of rows currently in the table, read outside the API
    pub async fn row_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM records")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count records")
    }

    /// Drop the schema and everything in it
    pub async fn cleanup(self) {
        self.pool.close().await;
        let _ = self
            .admin
            .execute(format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema).as_str())
            .await;
    }
}

/// Router over a pool that never connects
///
/// Any request that reaches the database fails with a 5xx, so a 4xx from
/// this router proves the request was rejected before any SQL ran.
pub fn offline_app() -> Router {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy(UNREACHABLE_DATABASE_URL)
        .expect("lazy pool from a well-formed URL");
    app_router(pool)
}

/// Captured response from an in-process request
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "body is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    /// The `code` field of an error body
    pub fn error_code(&self) -> String {
        self.json()["code"]
            .as_str()
            .expect("error body has a code")
            .to_string()
    }
}

/// Send a request with an optional JSON body
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => Request::builder().method(method).uri(uri).body(Body::empty()),
    }
    .unwrap();

    send_request(app, request).await
}

/// Send a request with a raw JSON-typed body, for malformed payloads
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    send_request(app, request).await
}

/// Send a prebuilt request
pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
