//! Point of sale: ring up an on-site order.
//!
//! The register submits product IDs and quantities; prices always come from
//! the backend catalog and the total from the core calculator, so the
//! register software can never invent its own prices.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use robusta_core::cart::{Cart, CartLine};
use robusta_core::catalog::Product;
use robusta_core::order::{NewOrder, Order};
use robusta_core::pricing;
use robusta_core::types::{PaymentMethod, ProductId, TableId};
use serde::Deserialize;

use crate::api::ApiError;
use crate::error::AppError;
use crate::middleware::auth::Authorized;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pos", get(sellable_products))
        .route("/pos/orders", post(place_order))
}

async fn sellable_products(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.api().products(&staff.token).await?;
    Ok(Json(
        products
            .into_iter()
            .filter(|product| product.available)
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
struct PosLine {
    product_id: i64,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
struct PosOrderRequest {
    items: Vec<PosLine>,
    #[serde(default)]
    promotion_code: Option<String>,
    payment_method: String,
    #[serde(default)]
    table_id: Option<i64>,
    #[serde(default)]
    note: Option<String>,
}

async fn place_order(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Json(request): Json<PosOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    if request.items.is_empty() {
        return Err(AppError::validation("Add at least one product"));
    }
    let payment_method: PaymentMethod = request
        .payment_method
        .parse()
        .map_err(|_| AppError::validation("Unknown payment method"))?;

    let catalog: HashMap<ProductId, Product> = state
        .api()
        .products(&staff.token)
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let mut cart = Cart::new();
    for item in &request.items {
        if item.quantity == 0 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }
        let product = catalog
            .get(&ProductId::new(item.product_id))
            .ok_or_else(|| AppError::validation("Unknown product on the order"))?;
        if !product.available {
            return Err(AppError::validation(format!(
                "{} is currently unavailable",
                product.name
            )));
        }
        cart.add_line(CartLine::new(
            product.id,
            product.name.clone(),
            product.price,
            item.quantity,
        ));
    }

    let promotion = match request.promotion_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => Some(
            state
                .api()
                .promotion(&staff.token, code)
                .await
                .map_err(|error| match error {
                    ApiError::NotFound(_) => {
                        AppError::validation("This promotion code is not valid")
                    }
                    other => AppError::Api(other),
                })?,
        ),
        _ => None,
    };

    let totals = pricing::quote(cart.lines(), promotion.as_ref());
    let mut order = NewOrder::from_cart(&cart, totals, payment_method);
    order.promotion_code = promotion.map(|promo| promo.code);
    order.table_id = request.table_id.map(TableId::new);
    order.note = request.note.filter(|note| !note.trim().is_empty());

    let placed = state.api().create_order(&staff.token, &order).await?;
    Ok((StatusCode::CREATED, Json(placed)))
}
