use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::storage::InMemoryBackend;
use tower::ServiceExt;

use server::routes::{self, ServerState};

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

fn build_app() -> (std::sync::Arc<InMemoryBackend>, Router) {
    let backend = InMemoryBackend::new();
    let state = ServerState::new(backend.clone());
    (backend, routes::build_router(state, cors()))
}

async fn post(app: &Router, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn alice() -> Value {
    json!({
        "username": "alice",
        "password": "s3cret",
        "fullName": "Alice Liddell",
        "age": 19,
        "email": "alice@example.com",
        "gender": "Female"
    })
}

#[tokio::test]
async fn register_returns_201_without_password() -> anyhow::Result<()> {
    let (backend, app) = build_app();
    let (status, body) = post(&app, "/register", alice()).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully!");
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["fullName"], "Alice Liddell");
    assert!(body["user"].get("password").is_none());

    // stored as supplied, password included
    let raw = String::from_utf8(backend.snapshot("users").await.unwrap_or_default())?;
    let stored: Value = serde_json::from_str(&raw)?;
    assert_eq!(stored[0]["password"], "s3cret");
    assert_eq!(stored[0]["gender"], "Female");
    Ok(())
}

#[tokio::test]
async fn short_username_is_rejected() -> anyhow::Result<()> {
    let (_, app) = build_app();
    let mut input = alice();
    input["username"] = json!("ab");
    let (status, body) = post(&app, "/register", input).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Username must be at least 3 characters long."}));

    let (status, _) = post(&app, "/register", json!({"username": "abc", "password": "12345", "age": 10, "email": "a@b"})).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_rejected() -> anyhow::Result<()> {
    let (_, app) = build_app();
    post(&app, "/register", alice()).await?;
    let (status, body) = post(
        &app,
        "/users",
        json!({"username": "alice", "password": "another", "age": 40, "email": "other@example.org"}),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username already exists.");
    Ok(())
}

#[tokio::test]
async fn each_constraint_reports_its_own_message() -> anyhow::Result<()> {
    let (_, app) = build_app();
    let cases = [
        ("password", json!("1234"), "Password must be at least 5 characters long."),
        ("fullName", json!("Al"), "Full name must be at least 10 characters long if provided."),
        ("age", json!(9), "Age must be at least 10."),
        ("email", json!("alice.example.com"), "Invalid email address."),
        ("gender", json!("robot"), "Gender must be either 'male' or 'female'."),
    ];
    for (field, value, expected) in cases {
        let mut input = alice();
        input[field] = value;
        let (status, body) = post(&app, "/register", input).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "field {field}");
        assert_eq!(body["error"], expected, "field {field}");
    }
    Ok(())
}

#[tokio::test]
async fn fractional_and_missing_ages_are_accepted() -> anyhow::Result<()> {
    let (backend, app) = build_app();
    let (status, body) = post(
        &app,
        "/register",
        json!({"username": "abc", "password": "12345", "age": 12.5, "email": "a@b"}),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["age"], json!(12.5));

    let (status, body) = post(
        &app,
        "/register",
        json!({"username": "noage", "password": "12345", "email": "n@b"}),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user"].get("age").is_none());

    let (status, body) = post(
        &app,
        "/register",
        json!({"username": "young", "password": "12345", "age": 9.5, "email": "y@b"}),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Age must be at least 10.");

    let raw = String::from_utf8(backend.snapshot("users").await.unwrap_or_default())?;
    let stored: Value = serde_json::from_str(&raw)?;
    assert_eq!(stored.as_array().map(|a| a.len()), Some(2));
    Ok(())
}

#[tokio::test]
async fn malformed_register_body() -> anyhow::Result<()> {
    let (_, app) = build_app();
    let req = Request::builder().method("POST").uri("/api/register").body(Body::from("{"))?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await?)?;
    assert_eq!(body["error"], "Invalid JSON data");
    Ok(())
}
