//! Floor table management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use robusta_core::types::TableId;

use crate::api::types::{TableInput, TableRecord, TableUpdate};
use crate::error::AppError;
use crate::middleware::auth::Authorized;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tables", get(list).post(create))
        .route("/tables/{id}", put(update))
}

async fn list(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
) -> Result<Json<Vec<TableRecord>>, AppError> {
    let tables = state.api().tables(&staff.token).await?;
    Ok(Json(tables))
}

async fn create(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Json(input): Json<TableInput>,
) -> Result<(StatusCode, Json<TableRecord>), AppError> {
    validate_new(&input)?;
    let table = state.api().create_table(&staff.token, &input).await?;
    Ok((StatusCode::CREATED, Json(table)))
}

/// Partial update; commonly just flipping `occupied` from the floor view.
async fn update(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Path(id): Path<i64>,
    Json(update): Json<TableUpdate>,
) -> Result<Json<TableRecord>, AppError> {
    validate_update(&update)?;
    let table = state
        .api()
        .update_table(&staff.token, TableId::new(id), &update)
        .await?;
    Ok(Json(table))
}

fn validate_new(input: &TableInput) -> Result<(), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::validation("Table name is required"));
    }
    if input.seats == 0 {
        return Err(AppError::validation("A table needs at least one seat"));
    }
    Ok(())
}

fn validate_update(update: &TableUpdate) -> Result<(), AppError> {
    if update.name.is_none() && update.seats.is_none() && update.occupied.is_none() {
        return Err(AppError::validation("Nothing to update"));
    }
    if update.seats == Some(0) {
        return Err(AppError::validation("A table needs at least one seat"));
    }
    Ok(())
}
