//! Shop settings.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::types::ShopSettings;
use crate::error::AppError;
use crate::middleware::auth::Authorized;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/settings", get(show).put(update))
}

async fn show(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
) -> Result<Json<ShopSettings>, AppError> {
    let settings = state.api().settings(&staff.token).await?;
    Ok(Json(settings))
}

async fn update(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Json(settings): Json<ShopSettings>,
) -> Result<Json<ShopSettings>, AppError> {
    if settings.shop_name.trim().is_empty() {
        return Err(AppError::validation("Shop name is required"));
    }
    if settings.phone.trim().is_empty() {
        return Err(AppError::validation("Phone number is required"));
    }

    let updated = state
        .api()
        .update_settings(&staff.token, &settings)
        .await?;
    Ok(Json(updated))
}
