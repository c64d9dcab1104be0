//! Checkout summary and order placement.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use robusta_core::order::NewOrder;
use robusta_core::types::PaymentMethod;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::auth::OptionalUser;
use crate::models::session::keys;
use crate::models::views::{CartView, OrderView, UserView};
use crate::services::cart::CartService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/checkout", get(summary).post(place_order))
}

#[derive(Serialize)]
struct CheckoutView {
    cart: CartView,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserView>,
    payment_methods: Vec<&'static str>,
}

const PAYMENT_METHODS: &[PaymentMethod] = &[
    PaymentMethod::Cash,
    PaymentMethod::Card,
    PaymentMethod::Momo,
    PaymentMethod::BankTransfer,
];

async fn summary(
    session: Session,
    OptionalUser(user): OptionalUser,
) -> Result<Json<CheckoutView>, AppError> {
    let (state, totals) = CartService::for_session(session).quote().await?;
    if state.cart.is_empty() {
        return Err(AppError::validation("Your cart is empty"));
    }

    Ok(Json(CheckoutView {
        cart: CartView::build(&state, totals),
        user: user.as_ref().map(UserView::from),
        payment_methods: PAYMENT_METHODS
            .iter()
            .copied()
            .map(PaymentMethod::as_str)
            .collect(),
    }))
}

#[derive(Debug, Deserialize)]
struct PlaceOrderRequest {
    payment_method: String,
    customer_name: String,
    phone: String,
    address: String,
    #[serde(default)]
    note: Option<String>,
}

/// Place the order: price the cart one last time, submit it to the backend,
/// and reset the cart only after the backend accepted it.
async fn place_order(
    State(app): State<AppState>,
    session: Session,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<Json<OrderView>, AppError> {
    let payment_method: PaymentMethod = request
        .payment_method
        .parse()
        .map_err(|_| AppError::validation("Unknown payment method"))?;

    validate_contact(&request)?;

    let token: Option<String> = session.get(keys::ACCESS_TOKEN).await?;
    let service = CartService::for_session(session);

    let (state, totals) = service.quote().await?;
    if state.cart.is_empty() {
        return Err(AppError::validation("Your cart is empty"));
    }

    let mut order = NewOrder::from_cart(&state.cart, totals, payment_method);
    order.promotion_code = state.promotion.as_ref().map(|promo| promo.code.clone());
    order.customer_name = Some(request.customer_name.trim().to_string());
    order.phone = Some(request.phone.trim().to_string());
    order.address = Some(request.address.trim().to_string());
    order.note = request.note.filter(|note| !note.trim().is_empty());

    let placed = app.api().create_order(token.as_deref(), &order).await?;
    service.clear().await?;

    Ok(Json(OrderView::from(&placed)))
}

fn validate_contact(request: &PlaceOrderRequest) -> Result<(), AppError> {
    if request.customer_name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let phone = request.phone.trim();
    if phone.is_empty() {
        return Err(AppError::validation("Phone number is required"));
    }
    if phone.chars().filter(char::is_ascii_digit).count() < 9 {
        return Err(AppError::validation("Phone number looks invalid"));
    }
    if request.address.trim().is_empty() {
        return Err(AppError::validation("Delivery address is required"));
    }
    Ok(())
}
