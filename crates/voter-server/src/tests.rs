//! HTTP scenarios driven through the router against the memory backend

use super::*;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use serde_json::{json, Value};
use config::DEFAULT_STORE_TIMEOUT_MS;
use std::time::Duration;
use tower::ServiceExt;
use voter_core::{Voter, VoterHistory};

fn app() -> Router {
    let store = VoterStore::new(
        Arc::new(MemoryStore::new()),
        Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
    );
    build_router(AppState::new(store))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seeded_app() -> Router {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/voters/add-sample-voters", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seeded"], 2);
    app
}

fn voters(body: Value) -> Vec<Voter> {
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_list_starts_empty_without_seeding() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/voters", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_seed_then_delete_one() {
    let app = seeded_app().await;

    let (status, body) = send(&app, Method::GET, "/voters", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(voters(body).len(), 2);

    let (status, body) = send(&app, Method::DELETE, "/voters/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Voter successfully deleted");

    let (_, body) = send(&app, Method::GET, "/voters", None).await;
    let remaining = voters(body);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].voter_id, 0);
}

#[tokio::test]
async fn test_create_voter() {
    let app = seeded_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/voters/3",
        Some(json!({"voter_id": 3, "name": "Pikachu"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"voter_id": 3, "name": "Pikachu", "voter_history": []}));

    let (_, body) = send(&app, Method::GET, "/voters", None).await;
    let all = voters(body);
    assert_eq!(all.len(), 3);
    assert!(all.contains(&Voter::new(3, "Pikachu")));

    let (status, body) = send(
        &app,
        Method::POST,
        "/voters/3",
        Some(json!({"voter_id": 3, "name": "Pikachu"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/voters/abc", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation");

    let (status, _) = send(&app, Method::POST, "/voters/-1", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/voters/4294967296", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing name
    let (status, _) = send(&app, Method::POST, "/voters/4", Some(json!({"voter_id": 4}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Body id disagrees with path
    let (status, _) = send(
        &app,
        Method::POST,
        "/voters/4",
        Some(json!({"voter_id": 5, "name": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No body at all
    let (status, _) = send(&app, Method::POST, "/voters/4", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/voters", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_and_delete_missing_voter() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/voters/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = send(&app, Method::DELETE, "/voters/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/voters/x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_all() {
    let app = seeded_app().await;

    let (status, body) = send(&app, Method::DELETE, "/voters", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 2);

    let (_, body) = send(&app, Method::GET, "/voters", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_poll_endpoints() {
    let app = seeded_app().await;

    let (status, body) = send(&app, Method::GET, "/voters/1/polls", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/voters/1/polls/7",
        Some(json!({"vote_date": "2024-11-05T14:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"poll_id": 7, "vote_date": "2024-11-05T14:00:00Z"}));

    // Empty body uses the current time
    let (status, _) = send(&app, Method::POST, "/voters/1/polls/8", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/voters/1/polls/7", None).await;
    assert_eq!(status, StatusCode::OK);
    let entry: VoterHistory = serde_json::from_value(body).unwrap();
    assert_eq!(entry.poll_id, 7);

    let (status, _) = send(&app, Method::POST, "/voters/1/polls/7", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, Method::DELETE, "/voters/1/polls/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Voter poll successfully deleted");

    let (_, body) = send(&app, Method::GET, "/voters/1/polls", None).await;
    let order: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["poll_id"].as_u64().unwrap())
        .collect();
    assert_eq!(order, vec![7, 8]);
}

#[tokio::test]
async fn test_poll_not_found_cases() {
    let app = seeded_app().await;

    for (method, uri) in [
        (Method::GET, "/voters/5/polls"),
        (Method::GET, "/voters/5/polls/0"),
        (Method::GET, "/voters/1/polls/99"),
        (Method::POST, "/voters/5/polls/1"),
        (Method::DELETE, "/voters/5/polls/0"),
        (Method::DELETE, "/voters/1/polls/99"),
    ] {
        let (status, _) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
    }

    let (status, _) = send(&app, Method::GET, "/voters/1/polls/x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/voters/1/polls/3", Some(json!({"vote_date": 5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_counts_requests() {
    let app = app();

    send(&app, Method::GET, "/voters", None).await;
    send(&app, Method::GET, "/voters/42", None).await;

    let (status, body) = send(&app, Method::GET, "/voters/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    // The health request itself is counted after the body is built
    assert_eq!(body["users_processed"], 2);
    assert_eq!(body["errors_encountered"], 1);
}

#[tokio::test]
async fn test_create_rejects_repeated_poll_ids() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/voters/3",
        Some(json!({
            "voter_id": 3,
            "name": "Pikachu",
            "voter_history": [
                {"poll_id": 1, "vote_date": "2024-01-01T00:00:00Z"},
                {"poll_id": 1, "vote_date": "2024-01-02T00:00:00Z"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation");

    let (status, _) = send(&app, Method::GET, "/voters/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
