//! Application error type and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;

use crate::api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("backend API error: {0}")]
    Api(#[from] ApiError),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("session expired")]
    SessionExpired,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),
}

impl AppError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::SessionExpired | Self::Api(ApiError::Unauthorized) => {
                Redirect::to("/auth/login").into_response()
            }
            Self::Api(ApiError::Forbidden) => error_body(
                StatusCode::FORBIDDEN,
                "The backend refused this action for your account",
            ),
            Self::Forbidden(message) => error_body(StatusCode::FORBIDDEN, &message),
            Self::Api(ApiError::NotFound(message)) | Self::NotFound(message) => {
                error_body(StatusCode::NOT_FOUND, &message)
            }
            Self::Api(ApiError::Rejected(message)) => {
                error_body(StatusCode::BAD_REQUEST, &message)
            }
            Self::Validation(message) => error_body(StatusCode::BAD_REQUEST, &message),
            Self::Api(error) => {
                tracing::error!(%error, "backend API failure");
                error_body(StatusCode::BAD_GATEWAY, "The backend is temporarily unavailable")
            }
            Self::Session(error) => {
                tracing::error!(%error, "session failure");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            }
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
