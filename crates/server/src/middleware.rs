//! Request pipeline layers that turn every failure into a JSON body.
//!
//! - [`panic_layer`] catches handler panics and answers 500.
//! - [`structured_framework_errors`] rewrites the plain-text or empty error
//!   responses axum produces on its own: 4xx as `error{code,description}`,
//!   5xx as `errors: <text>`.

use std::any::Any;

use axum::extract::Request;
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use crate::errors::{ApiError, ErrorBody};

/// Framework error bodies are short text; anything past this is dropped.
const MAX_FRAMEWORK_BODY: usize = 16 * 1024;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

pub fn panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal(panic_message(err.as_ref())).into_response()
}

pub fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Middleware: wrap non-JSON error responses in the JSON error shapes,
/// keeping the status.
pub async fn structured_framework_errors(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(response.headers()) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let description = match axum::body::to_bytes(body, MAX_FRAMEWORK_BODY).await {
        Ok(bytes) if !bytes.is_empty() => String::from_utf8_lossy(&bytes).trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("error")
            .to_lowercase(),
    };

    if status.is_server_error() {
        error!(%status, error = %description, "request failed");
        return (status, Json(ErrorBody { status: "error", errors: description })).into_response();
    }

    let mut rewritten = ApiError::Http { status, description }.into_response();
    // 405 需要保留 Allow 头
    if let Some(allow) = parts.headers.get(header::ALLOW) {
        rewritten.headers_mut().insert(header::ALLOW, allow.clone());
    }
    rewritten
}
