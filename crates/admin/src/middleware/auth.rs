//! The console's single authorization gate.
//!
//! Every page handler declares [`Authorized`]; extraction loads the staff
//! member from the session and runs the permission gate against the root of
//! the requested path. Handlers therefore never check roles themselves.
//!
//! Rejections follow where the request came from: page requests get
//! redirects (to login when signed out, to the first visible page when the
//! role cannot open this one), `/api/`-prefixed requests get JSON statuses.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use robusta_core::permissions::check_access;
use serde_json::json;
use tower_sessions::Session;

use crate::models::session::{CurrentStaff, keys};
use crate::navigation;

/// A signed-in staff member allowed to open the requested page.
#[derive(Debug, Clone)]
pub struct Authorized(pub CurrentStaff);

#[derive(Debug)]
pub enum AuthzRejection {
    NotLoggedIn { json: bool },
    Forbidden { json: bool, fallback: &'static str },
    SessionUnavailable,
}

impl IntoResponse for AuthzRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotLoggedIn { json: true } => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Authentication required" })),
            )
                .into_response(),
            Self::NotLoggedIn { json: false } => Redirect::to("/auth/login").into_response(),
            Self::Forbidden { json: true, .. } => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "You do not have access to this page" })),
            )
                .into_response(),
            Self::Forbidden {
                json: false,
                fallback,
            } => Redirect::to(fallback).into_response(),
            Self::SessionUnavailable => {
                tracing::error!("session unavailable during authorization");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for Authorized
where
    S: Send + Sync,
{
    type Rejection = AuthzRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_owned();
        let json = path.starts_with("/api/");

        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthzRejection::SessionUnavailable)?;

        let staff: CurrentStaff = session
            .get(keys::CURRENT_STAFF)
            .await
            .map_err(|_| AuthzRejection::SessionUnavailable)?
            .ok_or(AuthzRejection::NotLoggedIn { json })?;

        let page = path.strip_prefix("/api").unwrap_or(&path);
        if !check_access(staff.role, page).is_permitted() {
            tracing::warn!(
                staff = %staff.email,
                role = ?staff.role,
                %path,
                "access denied"
            );
            return Err(AuthzRejection::Forbidden {
                json,
                fallback: navigation::fallback_page(staff.role),
            });
        }

        Ok(Self(staff))
    }
}

/// Record a successful console sign-in.
pub async fn store_sign_in(
    session: &Session,
    staff: &CurrentStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_STAFF, staff).await
}

/// Drop the console credentials.
pub async fn clear_sign_in(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentStaff>(keys::CURRENT_STAFF).await?;
    Ok(())
}
