use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use edit_workflow::{NOT_FOUND_MESSAGE, StoreError};
use serde_json::json;

pub enum ApiError {
    NotFound(String),
    Unprocessable(String),
    Internal(String),
}

impl ApiError {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            StoreError::Rejected(message) => ApiError::Unprocessable(message),
            StoreError::Unavailable(message) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => {
                tracing::error!("request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
