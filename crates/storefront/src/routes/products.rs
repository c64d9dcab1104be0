//! Catalog listing and product detail.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use robusta_core::types::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::views::{CategoryView, ProductView};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list))
        .route("/products/{id}", get(detail))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    category: Option<i64>,
}

#[derive(Serialize)]
struct ProductListView {
    categories: Vec<CategoryView>,
    products: Vec<ProductView>,
}

/// Unavailable products are hidden from the listing but still resolvable by
/// ID, so a stale detail page shows "unavailable" instead of a 404.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductListView>, AppError> {
    let categories = state.api().categories().await?;
    let products = state
        .api()
        .list_products(query.category.map(CategoryId::new))
        .await?;

    Ok(Json(ProductListView {
        categories: categories.iter().map(CategoryView::from).collect(),
        products: products
            .iter()
            .filter(|product| product.available)
            .map(ProductView::from)
            .collect(),
    }))
}

async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductView>, AppError> {
    let product = state.api().product(ProductId::new(id)).await?;
    Ok(Json(ProductView::from(&product)))
}
