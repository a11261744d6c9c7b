//! HTTP error mapping

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use menu_core::error::{DomainError, ErrorKind};

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, ErrorKind) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorKind::NotFound),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, ErrorKind::Conflict),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, ErrorKind::Forbidden),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorKind::Validation),
            ApiError::Unavailable(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Unavailable),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound(message),
            ErrorKind::Conflict => ApiError::Conflict(message),
            ErrorKind::Forbidden => ApiError::Forbidden(message),
            ErrorKind::Validation => ApiError::BadRequest(message),
            ErrorKind::Unavailable => ApiError::Unavailable(message),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.parts();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("{}: {}", kind.as_str(), message);
        } else {
            tracing::warn!("{}: {}", kind.as_str(), message);
        }

        (status, Json(ApiResponse::<()>::error(kind, message))).into_response()
    }
}
