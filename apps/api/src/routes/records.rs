//! Record CRUD route handlers
//!
//! - `GET /records` - List all records, ascending by id
//! - `GET /records/:id` - Fetch one record
//! - `POST /records` - Create a record
//! - `PUT /records/:id` - Replace a record's fields
//! - `DELETE /records/:id` - Delete a record
//!
//! Each handler performs exactly one repository call. Decoding and
//! validation happen before that call, so a rejected request never
//! touches the database.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{RecordId, ValidJson};
use crate::models::{Record, RecordInput};
use crate::repositories::RecordRepository;

/// Shared application state for record handlers
#[derive(Clone)]
pub struct RecordsState {
    /// Record repository
    pub repo: Arc<RecordRepository>,
}

impl RecordsState {
    /// Create new records state
    pub fn new(repo: RecordRepository) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

/// Create the records router
pub fn records_router(state: RecordsState) -> Router {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route(
            "/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
        .with_state(state)
}

/// List all records
///
/// # Response
/// - 200 OK: JSON array, empty when the table has no rows
async fn list_records(State(state): State<RecordsState>) -> ApiResult<Json<Vec<Record>>> {
    let records = state.repo.list_all().await?;
    Ok(Json(records))
}

/// Fetch a single record
///
/// # Response
/// - 200 OK: the record
/// - 400 Bad Request: id is not an integer
/// - 404 Not Found: no record with that id
async fn get_record(
    State(state): State<RecordsState>,
    RecordId(id): RecordId,
) -> ApiResult<Json<Record>> {
    let record = state.repo.find_by_id(id).await?;
    Ok(Json(record))
}

/// Create a record
///
/// # Request
/// - Body: JSON with title, artist, price
///
/// # Response
/// - 201 Created: the stored record with its new id, plus a Location header
/// - 400 Bad Request: malformed body or invalid field values
async fn create_record(
    State(state): State<RecordsState>,
    ValidJson(input): ValidJson<RecordInput>,
) -> ApiResult<impl IntoResponse> {
    input.validate().map_err(ApiError::ValidationError)?;

    let record = state.repo.create(&input).await?;
    tracing::info!(id = record.id, title = %record.title, "Record created");

    let location = format!("/records/{}", record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    ))
}

/// Replace every mutable field of a record
///
/// # Response
/// - 200 OK: the updated record
/// - 400 Bad Request: malformed id, body, or field values
/// - 404 Not Found: no record with that id
async fn update_record(
    State(state): State<RecordsState>,
    RecordId(id): RecordId,
    ValidJson(input): ValidJson<RecordInput>,
) -> ApiResult<Json<Record>> {
    input.validate().map_err(ApiError::ValidationError)?;

    let record = state.repo.update(id, &input).await?;
    tracing::info!(id, "Record updated");

    Ok(Json(record))
}

/// Delete a record
///
/// # Response
/// - 204 No Content: deleted
/// - 404 Not Found: no record with that id
async fn delete_record(
    State(state): State<RecordsState>,
    RecordId(id): RecordId,
) -> ApiResult<StatusCode> {
    state.repo.delete(id).await?;
    tracing::info!(id, "Record deleted");

    Ok(StatusCode::NO_CONTENT)
}
