//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` (via `build_app_router`) so
//! tests exercise the same middleware stack production uses, with the mock
//! LLM provider wired in.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use draftdeck_api::auth::jwt::{generate_token, JwtConfig};
use draftdeck_api::auth::password::hash_password;
use draftdeck_api::config::ServerConfig;
use draftdeck_api::router::build_app_router;
use draftdeck_api::state::AppState;
use draftdeck_db::models::user::{CreateUser, User};
use draftdeck_db::repositories::UserRepo;
use draftdeck_llm::{LlmConfig, LlmService};

/// Fixed JWT secret for tests.
const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiry_hours: 24,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the mock LLM provider.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        llm: Arc::new(LlmService::new(LlmConfig::mock())),
    };
    build_app_router(state, &config)
}

/// Create a user directly in the database and return the row plus a valid
/// bearer token for it.
pub async fn create_test_user(pool: &PgPool, name: &str, email: &str) -> (User, String) {
    let password_hash = hash_password("test_password_123!").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_token(user.id, &user.email, &test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Sign up and log in through the API, returning the token.
pub async fn signup_and_login(app: &Router, name: &str, email: &str, password: &str) -> String {
    let signup = post_json(
        app.clone(),
        "/api/auth/signup",
        serde_json::json!({ "name": name, "email": email, "password": password }),
    )
    .await;
    assert_eq!(signup.status(), StatusCode::CREATED);

    let login = post_json(
        app.clone(),
        "/api/auth/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);

    let json = body_json(login).await;
    json["token"].as_str().expect("token present").to_string()
}
