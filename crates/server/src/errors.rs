use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Body for faults and unmatched paths: `{"status":"error","errors":"..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub errors: String,
}

/// Body for client and framework errors:
/// `{"status":"error","error":{"code":400,"description":"..."}}`.
#[derive(Debug, Serialize)]
pub struct HttpErrorBody {
    pub status: &'static str,
    pub error: HttpErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct HttpErrorDetail {
    pub code: u16,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input from the client (400).
    #[error("{0}")]
    Validation(String),
    /// Error raised by the HTTP framework itself, status preserved.
    #[error("{description}")]
    Http { status: StatusCode, description: String },
    /// Anything unexpected (500).
    #[error("{0}")]
    Internal(String),
    #[error("not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Http { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn http_body(status: StatusCode, description: String) -> HttpErrorBody {
        HttpErrorBody {
            status: "error",
            error: HttpErrorDetail { code: status.as_u16(), description },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(description) | ApiError::Http { description, .. } => {
                (status, Json(Self::http_body(status, description))).into_response()
            }
            ApiError::Internal(errors) => {
                error!(error = %errors, "request failed");
                (status, Json(ErrorBody { status: "error", errors })).into_response()
            }
            ApiError::NotFound => {
                (status, Json(ErrorBody { status: "error", errors: "not found".into() })).into_response()
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => ApiError::Validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Http { status: rejection.status(), description: rejection.body_text() }
    }
}
