//! Database repository layer for recordshelf
//!
//! Handlers never run SQL directly; they go through a repository that owns
//! the pool and is handed to them as router state.

pub mod record;
pub mod utils;

use thiserror::Error;

pub use record::RecordRepository;

/// Errors returned by repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No row matched the given id
    #[error("no record with id {0}")]
    NotFound(i64),

    /// The statement failed to execute
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// The statement ran but a row could not be mapped onto the model
    #[error("row mapping failed: {0}")]
    Mapping(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if utils::is_mapping_error(&err) {
            Self::Mapping(err)
        } else {
            Self::Query(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_sqlx_errors_are_split_by_kind() {
        let mapping: RepositoryError = sqlx::Error::ColumnNotFound("title".to_string()).into();
        assert_matches!(mapping, RepositoryError::Mapping(_));

        let query: RepositoryError = sqlx::Error::PoolClosed.into();
        assert_matches!(query, RepositoryError::Query(_));
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            RepositoryError::NotFound(12).to_string(),
            "no record with id 12"
        );
    }
}
