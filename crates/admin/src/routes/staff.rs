//! Staff account management (admin only, enforced by the gate).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use robusta_core::permissions::Role;
use robusta_core::types::{Email, UserId};
use robusta_core::user::User;
use serde::Deserialize;

use crate::api::types::StaffInput;
use crate::error::AppError;
use crate::middleware::auth::Authorized;
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/staff", get(list).post(create))
        .route("/staff/{id}/role", put(update_role))
        .route("/staff/{id}/deactivate", post(deactivate))
}

async fn list(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state.api().staff_users(&staff.token).await?;
    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
struct CreateForm {
    name: String,
    email: String,
    password: String,
    role: String,
}

async fn create(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Json(form): Json<CreateForm>,
) -> Result<(StatusCode, Json<User>), AppError> {
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
    let role = parse_back_office_role(&form.role)?;

    let user = state
        .api()
        .create_staff(
            &staff.token,
            &StaffInput {
                name: name.to_string(),
                email: email.to_string(),
                password: form.password,
                role,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
struct RoleForm {
    role: String,
}

async fn update_role(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Path(id): Path<i64>,
    Json(form): Json<RoleForm>,
) -> Result<Json<User>, AppError> {
    let role = parse_back_office_role(&form.role)?;
    let user = state
        .api()
        .update_staff_role(&staff.token, UserId::new(id), role)
        .await?;
    Ok(Json(user))
}

async fn deactivate(
    State(state): State<AppState>,
    Authorized(staff): Authorized,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if staff.id == UserId::new(id) {
        return Err(AppError::validation(
            "You cannot deactivate your own account",
        ));
    }
    state
        .api()
        .deactivate_staff(&staff.token, UserId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Staff accounts only come in back-office flavors; customer accounts are
/// created through storefront registration.
fn parse_back_office_role(raw: &str) -> Result<Role, AppError> {
    let role: Role = raw
        .parse()
        .map_err(|_| AppError::validation("Unknown role"))?;
    if !role.is_back_office() {
        return Err(AppError::validation(
            "Staff accounts must be admin or staff",
        ));
    }
    Ok(role)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_back_office_role() {
        assert_eq!(parse_back_office_role("admin").unwrap(), Role::Admin);
        assert_eq!(parse_back_office_role("staff").unwrap(), Role::Staff);
        assert!(parse_back_office_role("customer").is_err());
        assert!(parse_back_office_role("superuser").is_err());
    }
}
