//! Console sign-in and sign-out.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use robusta_core::types::Email;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::api::ApiError;
use crate::api::types::LoginRequest;
use crate::error::AppError;
use crate::middleware::auth;
use crate::models::session::{CurrentStaff, keys};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct StaffView {
    id: i64,
    email: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

impl From<&CurrentStaff> for StaffView {
    fn from(staff: &CurrentStaff) -> Self {
        Self {
            id: staff.id.into(),
            email: staff.email.to_string(),
            name: staff.name.clone(),
            role: staff.role.map(|role| role.to_string()),
        }
    }
}

/// Sign in. Customer accounts are turned away here even with valid
/// credentials; the console is for back-office roles only.
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<StaffView>, AppError> {
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
            ApiError::Unauthorized => AppError::validation("Invalid email or password"),
            other => AppError::Api(other),
        })?;

    let back_office = response.user.role.is_some_and(|role| role.is_back_office());
    if !back_office {
        tracing::warn!(email = %response.user.email, "console login refused");
        return Err(AppError::Forbidden(
            "This account cannot access the console".to_string(),
        ));
    }

    let staff = CurrentStaff {
        id: response.user.id,
        email: response.user.email,
        name: response.user.name,
        role: response.user.role,
        token: response.token,
    };
    auth::store_sign_in(&session, &staff).await?;
    Ok(Json(StaffView::from(&staff)))
}

async fn logout(session: Session) -> Result<StatusCode, AppError> {
    auth::clear_sign_in(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn me(session: Session) -> Result<Json<Option<StaffView>>, AppError> {
    let staff: Option<CurrentStaff> = session.get(keys::CURRENT_STAFF).await?;
    Ok(Json(staff.as_ref().map(StaffView::from)))
}
