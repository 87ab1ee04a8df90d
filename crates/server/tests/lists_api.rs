use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes;
use server::state::ServerState;
use service::errors::ServiceError;
use service::lists::ListKey;
use service::storage::{KvStore, MemoryKvStore};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app() -> Router {
    routes::build_router(ServerState::in_memory(), cors())
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

fn post_json(uri: &str, body: &Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().method(Method::GET).uri(uri).body(Body::empty())?)
}

fn sorted(lists: &Value) -> Vec<String> {
    let mut out: Vec<String> = lists
        .as_array()
        .map(|a| a.iter().map(Value::to_string).collect())
        .unwrap_or_default();
    out.sort();
    out
}

#[tokio::test]
async fn fresh_service_shows_no_lists() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, get("/show_lists/")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"lists": []}));
    Ok(())
}

#[tokio::test]
async fn added_lists_come_back_from_show_lists() -> anyhow::Result<()> {
    let app = build_app();

    let (status, body) = send(&app, post_json("/add_new_list/", &json!({"new_item": [1, 2, 3]}))?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, _) = send(&app, post_json("/add_new_list/", &json!({"new_item": ["x", {"y": [true]}]}))?).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, get("/show_lists/")?).await?;
    assert_eq!(status, StatusCode::OK);
    let expected = json!([[1, 2, 3], ["x", {"y": [true]}]]);
    assert_eq!(sorted(&body["lists"]), sorted(&expected));

    // repeated reads without writes are identical
    let (_, again) = send(&app, get("/show_lists/")?).await?;
    assert_eq!(again, body);
    Ok(())
}

#[tokio::test]
async fn missing_new_item_is_rejected() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, post_json("/add_new_list/", &json!({"items": [1]}))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": "error", "error": {"code": 400, "description": "no data[new_item]"}})
    );
    Ok(())
}

#[tokio::test]
async fn non_list_new_item_is_rejected() -> anyhow::Result<()> {
    let app = build_app();
    for value in [json!("abc"), json!({"a": 1}), json!(7)] {
        let (status, body) = send(&app, post_json("/add_new_list/", &json!({ "new_item": value }))?).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"]["code"], 400);
        assert_eq!(body["error"]["description"], "new_item isn't list");
    }

    // nothing was stored
    let (_, body) = send(&app, get("/show_lists/")?).await?;
    assert_eq!(body, json!({"lists": []}));
    Ok(())
}

#[tokio::test]
async fn malformed_json_keeps_framework_status() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/add_new_list/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], 400);
    assert!(!body["error"]["description"].as_str().unwrap_or_default().is_empty());
    Ok(())
}

fn post_raw(content_type: Option<&str>, body: &'static str) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().method(Method::POST).uri("/add_new_list/");
    if let Some(ct) = content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    Ok(builder.body(Body::from(body))?)
}

#[tokio::test]
async fn bodies_without_json_count_as_missing_new_item() -> anyhow::Result<()> {
    let app = build_app();
    let expected = json!({"status": "error", "error": {"code": 400, "description": "no data[new_item]"}});

    let cases = [
        post_raw(None, "")?,
        post_raw(Some("application/json"), "")?,
        post_raw(Some("application/json"), "  \n")?,
        post_raw(Some("application/x-www-form-urlencoded"), "new_item=abc")?,
        post_raw(None, r#"{"new_item": [1]}"#)?,
    ];
    for req in cases {
        let (status, body) = send(&app, req).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, expected);
    }

    // a JSON media type with parameters is still JSON
    let (status, _) = send(&app, post_raw(Some("application/json; charset=utf-8"), r#"{"new_item": [1]}"#)?).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, get("/show_lists/")?).await?;
    assert_eq!(body, json!({"lists": [[1]]}));
    Ok(())
}

struct UnavailableStore;

#[async_trait::async_trait]
impl KvStore for UnavailableStore {
    async fn flush_all(&self) -> Result<(), ServiceError> { Err(unavailable()) }
    async fn set(&self, _key: ListKey, _value: String) -> Result<(), ServiceError> { Err(unavailable()) }
    async fn get(&self, _key: ListKey) -> Result<Option<String>, ServiceError> { Err(unavailable()) }
    async fn keys(&self) -> Result<Vec<ListKey>, ServiceError> { Err(unavailable()) }
    async fn len(&self) -> Result<usize, ServiceError> { Err(unavailable()) }
}

fn unavailable() -> ServiceError {
    ServiceError::Store("connection refused".into())
}

#[tokio::test]
async fn store_fault_surfaces_as_500_with_diagnostic() -> anyhow::Result<()> {
    let app = routes::build_router(ServerState::new(Arc::new(UnavailableStore)), cors());

    let (status, body) = send(&app, get("/show_lists/")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"status": "error", "errors": "store error: connection refused"}));

    let (status, body) = send(&app, post_json("/add_new_list/", &json!({"new_item": [1]}))?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["errors"], "store error: connection refused");
    Ok(())
}

#[tokio::test]
async fn corrupt_stored_entry_surfaces_as_500() -> anyhow::Result<()> {
    let store = Arc::new(MemoryKvStore::new());
    store.set(0, "{truncated".into()).await?;
    let app = routes::build_router(ServerState::new(store), cors());

    let (status, body) = send(&app, get("/show_lists/")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert!(body["errors"].as_str().unwrap_or_default().starts_with("stored list 0 is not valid JSON"));
    Ok(())
}

#[tokio::test]
async fn example_error_returns_500_and_service_survives() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, get("/example_error/")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    let diagnostic = body["errors"].as_str().unwrap_or_default();
    assert!(diagnostic.contains("divide by zero"), "diagnostic was {diagnostic:?}");

    let (status, _) = send(&app, get("/show_lists/")?).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn unknown_path_is_json_404() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, get("/nope/")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "error", "errors": "not found"}));
    Ok(())
}

#[tokio::test]
async fn wrong_method_is_structured_405() -> anyhow::Result<()> {
    let app = build_app();
    let resp = app.clone().oneshot(get("/add_new_list/")?).await?;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(resp.headers().contains_key(header::ALLOW));
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], 405);
    assert_eq!(body["error"]["description"], "method not allowed");
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_served() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, get("/health")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send(&app, get("/api-docs/openapi.json")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/add_new_list/").is_some());
    assert!(doc["paths"].get("/show_lists/").is_some());
    Ok(())
}
