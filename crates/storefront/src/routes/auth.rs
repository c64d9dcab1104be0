//! Customer sign-in, registration, and sign-out.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use robusta_core::types::Email;
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::ApiError;
use crate::api::types::{LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::middleware::auth::{self, OptionalUser};
use crate::models::session::CurrentUser;
use crate::models::views::UserView;
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<UserView>, AppError> {
    let email = Email::parse(&form.email)
        .map_err(|_| AppError::validation("Enter a valid email address"))?;
    if form.password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    let response = state
        .api()
        .login(&LoginRequest {
            email: email.to_string(),
            password: form.password,
        })
        .await
        .map_err(|error| match error {
            // Wrong credentials, not an expired session.
            ApiError::Unauthorized => AppError::validation("Invalid email or password"),
            other => AppError::Api(other),
        })?;

    let user = CurrentUser::from(response.user);
    auth::store_sign_in(&session, &user, &response.token).await?;
    Ok(Json(UserView::from(&user)))
}

#[derive(Debug, Deserialize)]
struct RegisterForm {
    name: String,
    email: String,
    password: String,
    confirm_password: String,
}

async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<UserView>), AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let email = Email::parse(&form.email)
        .map_err(|_| AppError::validation("Enter a valid email address"))?;
    if form.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(
            "Password must be at least 8 characters",
        ));
    }
    if form.password != form.confirm_password {
        return Err(AppError::validation("Passwords do not match"));
    }

    let response = state
        .api()
        .register(&RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: form.password,
        })
        .await?;

    // Registration signs the customer in directly.
    let user = CurrentUser::from(response.user);
    auth::store_sign_in(&session, &user, &response.token).await?;
    Ok((StatusCode::CREATED, Json(UserView::from(&user))))
}

/// Signing out drops the credentials but keeps the cart.
async fn logout(session: Session) -> Result<StatusCode, AppError> {
    auth::clear_sign_in(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn me(OptionalUser(user): OptionalUser) -> Json<Option<UserView>> {
    Json(user.as_ref().map(UserView::from))
}
