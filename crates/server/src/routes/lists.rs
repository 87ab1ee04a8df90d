use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use common::types::StatusBody;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use service::lists::domain::MISSING_NEW_ITEM;

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct ListsResponse {
    pub lists: Vec<Value>,
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .is_some_and(|mime| mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json")))
}

/// Decode a submission body. An empty body counts as `{}` and a non-JSON
/// body carries no `new_item`; both end up as missing data. Malformed JSON
/// keeps the framework rejection.
fn submitted_body(headers: &HeaderMap, raw: &Bytes) -> Result<Value, ApiError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    if !is_json_content_type(headers) {
        return Err(ApiError::Validation(MISSING_NEW_ITEM.to_string()));
    }
    let Json(body) = Json::<Value>::from_bytes(raw)?;
    Ok(body)
}

#[utoipa::path(
    post, path = "/add_new_list/", tag = "lists",
    request_body = crate::openapi::NewListRequestDoc,
    responses(
        (status = 201, description = "Stored", body = crate::openapi::StatusBodyDoc),
        (status = 400, description = "Missing or non-list new_item")
    )
)]
pub async fn add_new_list(
    State(state): State<ServerState>,
    headers: HeaderMap,
    raw: Bytes,
) -> Result<(StatusCode, Json<StatusBody>), ApiError> {
    let body = submitted_body(&headers, &raw)?;
    let key = state.lists.submit(&body).await?;
    info!(key, "list_added");
    Ok((StatusCode::CREATED, Json(StatusBody::ok())))
}

#[utoipa::path(
    get, path = "/show_lists/", tag = "lists",
    responses(
        (status = 200, description = "All stored lists", body = crate::openapi::ListsResponseDoc),
        (status = 500, description = "Store fault")
    )
)]
pub async fn show_lists(State(state): State<ServerState>) -> Result<Json<ListsResponse>, ApiError> {
    let lists = state.lists.list_all().await?;
    Ok(Json(ListsResponse { lists }))
}

/// Divides by zero on purpose so the panic path can be exercised end to end.
#[utoipa::path(
    get, path = "/example_error/", tag = "lists",
    responses((status = 500, description = "Always fails"))
)]
pub async fn example_error() -> Json<Value> {
    let numerator: i64 = 1;
    let divisor = std::hint::black_box(0_i64);
    Json(serde_json::json!({ "result": numerator / divisor }))
}
