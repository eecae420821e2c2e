//! Record model for recordshelf
//!
//! A record is a single album row in the `records` table. The same shape is
//! returned by every read and write endpoint.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Maximum accepted length for text fields, in characters
pub const MAX_TEXT_LEN: usize = 255;

/// Record row from the records table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Record {
    /// Database-assigned identifier
    pub id: i64,

    /// Album title
    pub title: String,

    /// Performing artist
    pub artist: String,

    /// Price in the shop's currency
    pub price: f64,
}

/// Request body for creating or replacing a record
///
/// Any `id` sent by the client is ignored; the database assigns ids on
/// create and the path decides which row an update touches.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RecordInput {
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl RecordInput {
    /// Check field constraints before anything reaches the database
    pub fn validate(&self) -> Result<(), String> {
        validate_text("title", &self.title)?;
        validate_text("artist", &self.artist)?;

        if !self.price.is_finite() {
            return Err("price must be a finite number".to_string());
        }
        if self.price < 0.0 {
            return Err("price must not be negative".to_string());
        }

        Ok(())
    }

    /// Build the record the database will hold for `id`
    pub fn into_record(self, id: i64) -> Record {
        Record {
            id,
            title: self.title,
            artist: self.artist,
            price: self.price,
        }
    }
}

fn validate_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be blank", field));
    }
    if value.contains('\0') {
        return Err(format!("{} must not contain NUL characters", field));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LEN
        ));
    }
    Ok(())
}
