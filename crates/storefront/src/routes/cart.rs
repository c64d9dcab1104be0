//! Cart pages and mutations.
//!
//! Every handler goes through [`CartService`] and responds with the full
//! refreshed [`CartView`], so the client never has to compute prices itself.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use robusta_core::cart::CartLine;
use robusta_core::types::ProductId;
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::ApiError;
use crate::error::AppError;
use crate::models::views::CartView;
use crate::services::cart::CartService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(show))
        .route("/cart/add", post(add_item))
        .route("/cart/update", post(update_item))
        .route("/cart/remove", post(remove_item))
        .route("/cart/promotion", post(apply_promotion))
        .route("/cart/promotion/remove", post(remove_promotion))
}

async fn show(session: Session) -> Result<Json<CartView>, AppError> {
    let (state, totals) = CartService::for_session(session).quote().await?;
    Ok(Json(CartView::build(&state, totals)))
}

#[derive(Debug, Deserialize)]
struct AddItemRequest {
    product_id: i64,
    quantity: Option<u32>,
}

async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartView>, AppError> {
    let quantity = request.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }

    // Snapshot name and price from the backend, never from the client.
    let product = state
        .api()
        .product(ProductId::new(request.product_id))
        .await?;
    if !product.available {
        return Err(AppError::validation("This product is currently unavailable"));
    }

    let mut line = CartLine::new(product.id, product.name, product.price, quantity);
    if let Some(image_url) = product.image_url {
        line = line.with_image(image_url);
    }
    if let Some(category) = product.category {
        line = line.with_category(category.name);
    }

    let (cart_state, totals) = CartService::for_session(session).add_line(line).await?;
    Ok(Json(CartView::build(&cart_state, totals)))
}

#[derive(Debug, Deserialize)]
struct UpdateItemRequest {
    product_id: i64,
    quantity: u32,
}

/// Quantity 0 removes the line.
async fn update_item(
    session: Session,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<CartView>, AppError> {
    let (state, totals) = CartService::for_session(session)
        .set_quantity(ProductId::new(request.product_id), request.quantity)
        .await?;
    Ok(Json(CartView::build(&state, totals)))
}

#[derive(Debug, Deserialize)]
struct RemoveItemRequest {
    product_id: i64,
}

async fn remove_item(
    session: Session,
    Json(request): Json<RemoveItemRequest>,
) -> Result<Json<CartView>, AppError> {
    let (state, totals) = CartService::for_session(session)
        .remove_line(ProductId::new(request.product_id))
        .await?;
    Ok(Json(CartView::build(&state, totals)))
}

#[derive(Debug, Deserialize)]
struct PromotionRequest {
    code: String,
}

async fn apply_promotion(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<PromotionRequest>,
) -> Result<Json<CartView>, AppError> {
    let code = request.code.trim();
    if code.is_empty() {
        return Err(AppError::validation("Enter a promotion code"));
    }

    let promotion = state.api().promotion(code).await.map_err(|error| match error {
        ApiError::NotFound(_) => AppError::validation("This promotion code is not valid"),
        other => AppError::Api(other),
    })?;

    let (cart_state, totals) = CartService::for_session(session)
        .apply_promotion(promotion)
        .await?;
    Ok(Json(CartView::build(&cart_state, totals)))
}

async fn remove_promotion(session: Session) -> Result<Json<CartView>, AppError> {
    let (state, totals) = CartService::for_session(session).clear_promotion().await?;
    Ok(Json(CartView::build(&state, totals)))
}
