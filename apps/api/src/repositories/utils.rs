//! Shared SQL fragments for repositories

/// SQL columns for record queries, in `Record` field order
pub const RECORD_COLUMNS: &str = "id, title, artist, price";

/// Whether a driver error came from turning a row into a model
///
/// These are raised after the statement ran, so they say nothing about the
/// health of the database itself.
pub fn is_mapping_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. }
    )
}
