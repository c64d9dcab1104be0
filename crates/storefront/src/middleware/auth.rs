//! Customer authentication extractors and session helpers.
//!
//! Sign-in stores the backend bearer token and a [`CurrentUser`] snapshot in
//! the session; handlers that need them declare [`RequireUser`] (or
//! [`OptionalUser`] for pages that render either way) instead of poking at
//! the session themselves.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::models::session::{CurrentUser, keys};

/// Extractor for pages that require a signed-in customer.
#[derive(Debug, Clone)]
pub struct RequireUser {
    pub user: CurrentUser,
    /// Bearer token for backend calls on this customer's behalf.
    pub token: String,
}

/// Extractor for pages that work both signed-in and anonymous.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

#[derive(Debug)]
pub enum AuthRejection {
    NotSignedIn,
    SessionUnavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotSignedIn => Redirect::to("/auth/login").into_response(),
            Self::SessionUnavailable => {
                tracing::error!("session unavailable during auth extraction");
                axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::SessionUnavailable)?;

        let user: Option<CurrentUser> = session
            .get(keys::CURRENT_USER)
            .await
            .map_err(|_| AuthRejection::SessionUnavailable)?;
        let token: Option<String> = session
            .get(keys::ACCESS_TOKEN)
            .await
            .map_err(|_| AuthRejection::SessionUnavailable)?;

        match (user, token) {
            (Some(user), Some(token)) => Ok(Self { user, token }),
            _ => Err(AuthRejection::NotSignedIn),
        }
    }
}

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::SessionUnavailable)?;

        let user = session
            .get(keys::CURRENT_USER)
            .await
            .map_err(|_| AuthRejection::SessionUnavailable)?;

        Ok(Self(user))
    }
}

/// Record a successful sign-in. The cart is deliberately left untouched so
/// items picked while browsing anonymously survive the login.
pub async fn store_sign_in(
    session: &Session,
    user: &CurrentUser,
    token: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_USER, user).await?;
    session.insert(keys::ACCESS_TOKEN, token).await?;
    Ok(())
}

/// Drop the credentials, keeping the cart and promotion.
pub async fn clear_sign_in(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(keys::CURRENT_USER).await?;
    session.remove::<String>(keys::ACCESS_TOKEN).await?;
    Ok(())
}
