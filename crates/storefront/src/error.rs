//! Application error type and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;

use crate::api::ApiError;
use crate::services::cart::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("backend API error: {0}")]
    Api(#[from] ApiError),

    #[error("cart store error: {0}")]
    CartStore(#[from] StoreError),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("session expired")]
    SessionExpired,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),
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
            Self::Api(ApiError::Forbidden) => {
                error_body(StatusCode::FORBIDDEN, "You are not allowed to do that")
            }
            Self::Api(ApiError::NotFound(message)) | Self::NotFound(message) => {
                error_body(StatusCode::NOT_FOUND, &message)
            }
            Self::Api(ApiError::Rejected(message)) => {
                error_body(StatusCode::BAD_REQUEST, &message)
            }
            Self::Validation(message) => error_body(StatusCode::BAD_REQUEST, &message),
            Self::Api(error) => {
                tracing::error!(%error, "backend API failure");
                error_body(StatusCode::BAD_GATEWAY, "The shop is temporarily unavailable")
            }
            Self::CartStore(error) => {
                tracing::error!(%error, "cart store failure");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
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
