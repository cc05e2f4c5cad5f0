use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use podium_core::AppState;
use podium_database::PlayerStore;
use podium_http::auth::IDENTITY_HEADER;

fn app() -> Router {
    podium_http::router(AppState::new(PlayerStore::memory()))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    user: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    if let Some(user) = user {
        builder = builder.header(IDENTITY_HEADER, user);
    }

    let request = builder
        .body(match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_player(app: &Router, name: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/players",
        Some(json!({ "name": name, "email": email, "character": "knight" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let (status, body) = send(&app(), "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn creating_a_player_returns_201_with_rank_assigned() {
    let app = app();
    let body = create_player(&app, "Ada", "ada@example.com").await;

    assert_eq!(body["name"], "Ada");
    assert_eq!(body["xp"], 0);
    assert_eq!(body["rank"], 1);
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn creating_with_missing_fields_returns_400() {
    let (status, body) = send(
        &app(),
        "POST",
        "/players",
        Some(json!({ "email": "no-name@example.com" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn duplicate_email_returns_409() {
    let app = app();
    create_player(&app, "First", "same@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/players",
        Some(json!({ "name": "Second", "email": "same@example.com" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn leaderboard_lists_players_in_xp_order() {
    let app = app();
    let low = create_player(&app, "Low", "low@example.com").await;
    let high = create_player(&app, "High", "high@example.com").await;

    let uri = format!("/players/{}/xp", high["id"].as_str().unwrap());
    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "xp_to_add": 75 })),
        Some("coach-1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, board) = send(&app, "GET", "/players", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let board = board.as_array().unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0]["id"], high["id"]);
    assert_eq!(board[0]["rank"], 1);
    assert_eq!(board[1]["id"], low["id"]);
    assert_eq!(board[1]["rank"], 2);
}

#[tokio::test]
async fn malformed_id_returns_400_and_unknown_id_returns_404() {
    let app = app();

    let (status, _) = send(&app, "GET", "/players/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "GET",
        "/players/8c7f3f8e-2c7b-4bd3-9d2e-0a1b2c3d4e5f",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn xp_adjustment_requires_caller_identity() {
    let app = app();
    let player = create_player(&app, "Solo", "solo@example.com").await;
    let uri = format!("/players/{}/xp", player["id"].as_str().unwrap());

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "xp_to_add": 10 })), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains(IDENTITY_HEADER));
}

#[tokio::test]
async fn xp_adjustment_applies_delta_and_clamps_at_zero() {
    let app = app();
    let player = create_player(&app, "Clamp", "clamp@example.com").await;
    let uri = format!("/players/{}/xp", player["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "xp_to_add": 30 })),
        Some("coach-1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["xp"], 30);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "xp_to_add": -100 })),
        Some("coach-1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["xp"], 0);
}

#[tokio::test]
async fn non_integer_delta_returns_400() {
    let app = app();
    let player = create_player(&app, "Typed", "typed@example.com").await;
    let uri = format!("/players/{}/xp", player["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "xp_to_add": "many" })),
        Some("coach-1"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_player_acknowledges_and_removes_it() {
    let app = app();
    let leader = create_player(&app, "Leader", "leader@example.com").await;
    let runner_up = create_player(&app, "RunnerUp", "runnerup@example.com").await;

    let uri = format!("/players/{}", leader["id"].as_str().unwrap());
    let (status, body) = send(&app, "DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Player deleted successfully");

    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/players/{}", runner_up["id"].as_str().unwrap());
    let (status, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rank"], 1);

    let uri = format!("/players/{}", leader["id"].as_str().unwrap());
    let (status, _) = send(&app, "DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
