//! Promotion management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use robusta_core::promotion::{DiscountType, Promotion};
use rust_decimal::Decimal;

use crate::error::AppError;
use crate::middleware::auth::Authorized;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/promotions", get(list).post(create))
        .route("/promotions/{code}", axum::routing::delete(remove))
}

async fn list(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
) -> Result<Json<Vec<Promotion>>, AppError> {
    let promotions = state.api().promotions(&staff.token).await?;
    Ok(Json(promotions))
}

async fn create(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Json(mut promotion): Json<Promotion>,
) -> Result<(StatusCode, Json<Promotion>), AppError> {
    promotion.code = promotion.code.trim().to_uppercase();
    validate(&promotion)?;

    let created = state
        .api()
        .create_promotion(&staff.token, &promotion)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn remove(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    state.api().delete_promotion(&staff.token, &code).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate(promotion: &Promotion) -> Result<(), AppError> {
    if promotion.code.is_empty() {
        return Err(AppError::validation("Promotion code is required"));
    }

    match promotion.discount_type {
        DiscountType::Percentage => {
            if promotion.discount_value <= Decimal::ZERO
                || promotion.discount_value > Decimal::from(100u32)
            {
                return Err(AppError::validation(
                    "Percentage must be between 0 and 100",
                ));
            }
        }
        DiscountType::Fixed => {
            if promotion.discount_value <= Decimal::ZERO {
                return Err(AppError::validation("Discount amount must be positive"));
            }
            if promotion.max_discount.is_some() {
                return Err(AppError::validation(
                    "A fixed discount cannot carry a cap",
                ));
            }
        }
    }
    Ok(())
}
