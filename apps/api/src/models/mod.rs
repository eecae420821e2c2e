//! Database models for recordshelf

pub mod record;

pub use record::{Record, RecordInput};
