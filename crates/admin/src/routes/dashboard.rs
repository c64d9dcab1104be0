//! Dashboard summary.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::types::DashboardSummary;
use crate::error::AppError;
use crate::middleware::auth::Authorized;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(summary))
}

async fn summary(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = state.api().reports_summary(&staff.token).await?;
    Ok(Json(summary))
}
