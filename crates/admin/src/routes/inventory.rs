//! Stock levels and adjustments.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::types::{StockAdjustment, StockLevel};
use crate::error::AppError;
use crate::middleware::auth::Authorized;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(list))
        .route("/inventory/adjust", post(adjust))
}

async fn list(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
) -> Result<Json<Vec<StockLevel>>, AppError> {
    let levels = state.api().inventory(&staff.token).await?;
    Ok(Json(levels))
}

/// Apply a signed stock delta. The backend rejects adjustments that would
/// take stock negative; that message passes through as a 400.
async fn adjust(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Json(adjustment): Json<StockAdjustment>,
) -> Result<Json<StockLevel>, AppError> {
    if adjustment.delta == 0 {
        return Err(AppError::validation("Adjustment must not be zero"));
    }

    let level = state
        .api()
        .adjust_stock(&staff.token, &adjustment)
        .await?;
    Ok(Json(level))
}
