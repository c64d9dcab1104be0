//! Catalog management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use robusta_core::catalog::Product;
use robusta_core::types::{Money, ProductId};

use crate::api::types::ProductInput;
use crate::error::AppError;
use crate::middleware::auth::Authorized;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/{id}", axum::routing::put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.api().products(&staff.token).await?;
    Ok(Json(products))
}

async fn create(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    validate(&input)?;
    let product = state.api().create_product(&staff.token, &input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, AppError> {
    validate(&input)?;
    let product = state
        .api()
        .update_product(&staff.token, ProductId::new(id), &input)
        .await?;
    Ok(Json(product))
}

async fn remove(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .api()
        .delete_product(&staff.token, ProductId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate(input: &ProductInput) -> Result<(), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    if input.price <= Money::ZERO {
        return Err(AppError::validation("Price must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: None,
            price: Money::new(price),
            image_url: None,
            category_id: None,
            available: true,
        }
    }

    #[test]
    fn test_validate_product_input() {
        assert!(validate(&input("Trà đào", 50_000)).is_ok());
        assert!(validate(&input("   ", 50_000)).is_err());
        assert!(validate(&input("Trà đào", 0)).is_err());
        assert!(validate(&input("Trà đào", -1)).is_err());
    }
}
