//! Signed-in customer account pages.
//!
//! These proxy to the backend with the customer's bearer token. A 401 from
//! the backend means the token expired server-side; the session credentials
//! are dropped and the customer is sent back to the login page.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use robusta_core::types::OrderId;
use robusta_core::user::User;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::api::ApiError;
use crate::api::types::ChangePasswordRequest;
use crate::error::AppError;
use crate::middleware::auth::{self, RequireUser};
use crate::models::views::OrderView;
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(profile))
        .route("/account/orders", get(orders))
        .route("/account/orders/{id}", get(order_detail))
        .route("/account/password", post(change_password))
}

#[derive(Serialize)]
struct ProfileView {
    id: i64,
    email: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

impl From<User> for ProfileView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            email: user.email.to_string(),
            name: user.name,
            phone: user.phone,
        }
    }
}

async fn profile(
    State(state): State<AppState>,
    session: Session,
    RequireUser { token, .. }: RequireUser,
) -> Result<Json<ProfileView>, AppError> {
    let user = match state.api().profile(&token).await {
        Ok(user) => user,
        Err(error) => return Err(expire_on_unauthorized(&session, error).await),
    };
    Ok(Json(ProfileView::from(user)))
}

async fn orders(
    State(state): State<AppState>,
    session: Session,
    RequireUser { token, .. }: RequireUser,
) -> Result<Json<Vec<OrderView>>, AppError> {
    let orders = match state.api().my_orders(&token).await {
        Ok(orders) => orders,
        Err(error) => return Err(expire_on_unauthorized(&session, error).await),
    };
    Ok(Json(orders.iter().map(OrderView::from).collect()))
}

async fn order_detail(
    State(state): State<AppState>,
    session: Session,
    RequireUser { token, .. }: RequireUser,
    Path(id): Path<i64>,
) -> Result<Json<OrderView>, AppError> {
    let order = match state.api().my_order(&token, OrderId::new(id)).await {
        Ok(order) => order,
        Err(error) => return Err(expire_on_unauthorized(&session, error).await),
    };
    Ok(Json(OrderView::from(&order)))
}

#[derive(Debug, Deserialize)]
struct ChangePasswordForm {
    current_password: String,
    new_password: String,
    confirm_password: String,
}

async fn change_password(
    State(state): State<AppState>,
    session: Session,
    RequireUser { token, .. }: RequireUser,
    Json(form): Json<ChangePasswordForm>,
) -> Result<StatusCode, AppError> {
    if form.new_password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(
            "New password must be at least 8 characters",
        ));
    }
    if form.new_password != form.confirm_password {
        return Err(AppError::validation("Passwords do not match"));
    }
    if form.new_password == form.current_password {
        return Err(AppError::validation(
            "New password must differ from the current one",
        ));
    }

    let request = ChangePasswordRequest {
        current_password: form.current_password,
        new_password: form.new_password,
    };
    if let Err(error) = state.api().change_password(&token, &request).await {
        return Err(expire_on_unauthorized(&session, error).await);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Map a backend 401 onto a session expiry, dropping the stale credentials
/// before redirecting to the login page.
async fn expire_on_unauthorized(session: &Session, error: ApiError) -> AppError {
    if matches!(error, ApiError::Unauthorized) {
        if let Err(error) = auth::clear_sign_in(session).await {
            tracing::warn!(%error, "failed to clear expired credentials");
        }
        return AppError::SessionExpired;
    }
    AppError::Api(error)
}
