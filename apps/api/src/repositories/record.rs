//! Record repository for centralized database operations
//!
//! Every statement here is parameterized; handler input never ends up in the
//! SQL text.

use sqlx::PgPool;

use super::utils::RECORD_COLUMNS;
use super::RepositoryError;
use crate::models::{Record, RecordInput};

/// Repository for record database operations
#[derive(Clone)]
pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    /// Create a new RecordRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every record, ascending by id
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Record>, RepositoryError> {
        let sql = format!("SELECT {} FROM records ORDER BY id ASC", RECORD_COLUMNS);
        sqlx::query_as::<_, Record>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    /// Find a record by its id
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<Record, RepositoryError> {
        let sql = format!("SELECT {} FROM records WHERE id = $1", RECORD_COLUMNS);
        sqlx::query_as::<_, Record>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(id))
    }

    /// Insert a record and return it with its new id
    #[tracing::instrument(level = "debug", skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: &RecordInput) -> Result<Record, RepositoryError> {
        let sql = format!(
            "INSERT INTO records (title, artist, price) VALUES ($1, $2, $3) RETURNING {}",
            RECORD_COLUMNS
        );
        let record = sqlx::query_as::<_, Record>(&sql)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(input.price)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(id = record.id, "Record created");
        Ok(record)
    }

    /// Replace every mutable field of the record with the given id
    ///
    /// Returns `NotFound` when no row matched.
    #[tracing::instrument(level = "debug", skip(self, input))]
    pub async fn update(&self, id: i64, input: &RecordInput) -> Result<Record, RepositoryError> {
        let sql = format!(
            r#"UPDATE records
            SET title = $1, artist = $2, price = $3
            WHERE id = $4
            RETURNING {}"#,
            RECORD_COLUMNS
        );
        sqlx::query_as::<_, Record>(&sql)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(input.price)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(id))
    }

    /// Hard-delete the record with the given id
    ///
    /// Returns `NotFound` when no row matched.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }

    /// Get total count of records
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM records")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }
}
