//! Order management.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use robusta_core::order::Order;
use robusta_core::types::{OrderId, OrderStatus};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::auth::Authorized;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list))
        .route("/orders/{id}", get(detail))
        .route("/orders/{id}/status", post(update_status))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()
        .map_err(|_| AppError::validation("Unknown order status filter"))?;

    let orders = state.api().orders(&staff.token, status).await?;
    Ok(Json(orders))
}

async fn detail(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError> {
    let order = state.api().order(&staff.token, OrderId::new(id)).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
struct StatusForm {
    status: String,
}

/// Move an order through its lifecycle. The transition is checked against
/// the order's current status before the backend is asked to do anything.
async fn update_status(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Path(id): Path<i64>,
    Json(form): Json<StatusForm>,
) -> Result<Json<Order>, AppError> {
    let next: OrderStatus = form
        .status
        .parse()
        .map_err(|_| AppError::validation("Unknown order status"))?;

    let id = OrderId::new(id);
    let order = state.api().order(&staff.token, id).await?;
    if !order.status.can_transition_to(next) {
        return Err(AppError::validation(format!(
            "Order {} cannot move from {} to {next}",
            order.code, order.status
        )));
    }

    let updated = state
        .api()
        .update_order_status(&staff.token, id, next)
        .await?;
    Ok(Json(updated))
}
