//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use kudos_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn make_store() -> Arc<SqliteStore> {
  Arc::new(SqliteStore::open_in_memory().await.unwrap())
}

async fn oneshot_json(
  store:  Arc<SqliteStore>,
  method: &str,
  uri:    &str,
  body:   Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = api_router(store)
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();

  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, json)
}

// ── GET ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty_store_returns_empty_array() {
  let (status, body) = oneshot_json(make_store().await, "GET", "/feedback", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([]));
}

// ── POST ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_record_and_list_includes_it() {
  let store = make_store().await;
  let (status, created) = oneshot_json(
    store.clone(),
    "POST",
    "/feedback",
    Some(json!({ "feedback": "Great service!", "rating": 5 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(created["feedback"], "Great service!");
  assert_eq!(created["rating"], 5);
  assert!(created["id"].is_string());
  assert!(created["creationDate"].is_string());

  let (status, list) = oneshot_json(store, "GET", "/feedback", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list, json!([created]));
}

#[tokio::test]
async fn create_duplicate_returns_400() {
  let store = make_store().await;
  let body = json!({ "feedback": "hello world", "rating": 4 });

  let (status, _) =
    oneshot_json(store.clone(), "POST", "/feedback", Some(body.clone())).await;
  assert_eq!(status, StatusCode::OK);

  let (status, err) = oneshot_json(store, "POST", "/feedback", Some(body)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err, json!({ "error": "feedback already exists" }));
}

#[tokio::test]
async fn create_invalid_body_returns_first_field_error() {
  let store = make_store().await;
  let (status, err) = oneshot_json(
    store.clone(),
    "POST",
    "/feedback",
    Some(json!({ "feedback": "abc", "rating": 9 })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    err["error"],
    "\"Feedback\" length must be at least 5 characters long"
  );

  let (_, list) = oneshot_json(store, "GET", "/feedback", None).await;
  assert_eq!(list, json!([]));
}

#[tokio::test]
async fn create_with_undeclared_field_returns_400() {
  let (status, err) = oneshot_json(
    make_store().await,
    "POST",
    "/feedback",
    Some(json!({
      "feedback": "hello world",
      "rating": 4,
      "creationDate": "2020-01-01T00:00:00Z",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], "\"creationDate\" is not allowed");
}

#[tokio::test]
async fn create_malformed_json_returns_error_body() {
  let req = Request::builder()
    .method("POST")
    .uri("/feedback")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{\"feedback\": "))
    .unwrap();
  let resp = api_router(make_store().await).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(body["error"].is_string(), "body: {body}");
}

#[tokio::test]
async fn create_accepts_text_with_embedded_nul() {
  let (status, created) = oneshot_json(
    make_store().await,
    "POST",
    "/feedback",
    Some(json!({ "feedback": "\u{0}hello world", "rating": 4 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(created["feedback"], "\u{0}hello world");
}

// ── PUT ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_invalid_id_returns_400() {
  let (status, err) = oneshot_json(
    make_store().await,
    "PUT",
    "/feedback/not-an-id",
    Some(json!({ "feedback": "hello world", "rating": 3 })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err, json!({ "error": "invalid id" }));
}

#[tokio::test]
async fn update_unknown_id_returns_404() {
  let (status, err) = oneshot_json(
    make_store().await,
    "PUT",
    "/feedback/6f1f3a0e-3c1d-4f5e-9a51-2b8c6d7e8f90",
    Some(json!({ "feedback": "hello world", "rating": 3 })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(err, json!({ "error": "feedback not found" }));
}

// ── DELETE ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_invalid_id_returns_400() {
  let (status, err) =
    oneshot_json(make_store().await, "DELETE", "/feedback/not-an-id", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err, json!({ "error": "invalid id" }));
}

// ── Scenario ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_update_delete_scenario() {
  let store = make_store().await;

  let (status, created) = oneshot_json(
    store.clone(),
    "POST",
    "/feedback",
    Some(json!({ "feedback": "Great service!", "rating": 5 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let id = created["id"].as_str().unwrap().to_string();
  let uri = format!("/feedback/{id}");

  let (status, updated) = oneshot_json(
    store.clone(),
    "PUT",
    &uri,
    Some(json!({ "feedback": "Even better", "rating": 4 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["id"], created["id"]);
  assert_eq!(updated["creationDate"], created["creationDate"]);
  assert_eq!(updated["feedback"], "Even better");
  assert_eq!(updated["rating"], 4);

  let (status, deleted) = oneshot_json(store.clone(), "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(deleted, updated);

  let (status, err) = oneshot_json(store.clone(), "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(err, json!({ "error": "feedback not found" }));

  let (_, list) = oneshot_json(store, "GET", "/feedback", None).await;
  assert_eq!(list, json!([]));
}

// ── Routing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn capitalised_paths_reach_the_same_handlers() {
  let store = make_store().await;

  let (status, body) = oneshot_json(store.clone(), "GET", "/Feedback", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([]));

  let (status, created) = oneshot_json(
    store.clone(),
    "POST",
    "/Feedback",
    Some(json!({ "feedback": "Great service!", "rating": 5 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let uri = format!("/Feedback/{}", created["id"].as_str().unwrap());

  let (status, updated) = oneshot_json(
    store.clone(),
    "PUT",
    &uri,
    Some(json!({ "feedback": "Even better", "rating": 4 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["id"], created["id"]);

  let (status, _) = oneshot_json(store.clone(), "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::OK);

  let (_, list) = oneshot_json(store, "GET", "/feedback", None).await;
  assert_eq!(list, json!([]));
}

#[tokio::test]
async fn unknown_path_returns_error_body() {
  let (status, err) = oneshot_json(make_store().await, "GET", "/nope", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(err, json!({ "error": "not found" }));
}

#[tokio::test]
async fn unsupported_method_returns_error_body() {
  let (status, err) =
    oneshot_json(make_store().await, "DELETE", "/feedback", None).await;
  assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
  assert_eq!(err, json!({ "error": "method not allowed" }));

  let (status, err) = oneshot_json(
    make_store().await,
    "GET",
    "/feedback/6f1f3a0e-3c1d-4f5e-9a51-2b8c6d7e8f90",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
  assert_eq!(err, json!({ "error": "method not allowed" }));
}

// ── Store failures ───────────────────────────────────────────────────────────

#[tokio::test]
async fn store_failure_returns_500_with_generic_message() {
  let store = make_store().await;
  store.close().await.unwrap();

  let (status, err) = oneshot_json(store, "GET", "/feedback", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(err, json!({ "error": "failed to list feedback" }));
}
