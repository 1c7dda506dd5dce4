//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the same
//! middleware stack (CORS, request ID, timeout, tracing, panic recovery)
//! that production uses. Requests are driven through
//! `tower::ServiceExt::oneshot`; a fresh router is built per request off a
//! shared pool.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use codabrate_api::auth::jwt::JwtConfig;
use codabrate_api::config::ServerConfig;
use codabrate_api::routes;
use codabrate_api::state::AppState;
use codabrate_api::ws::WsManager;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        registration_email_suffix: ".edu.tr".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let ws_manager = Arc::new(WsManager::new());
    let event_bus = Arc::new(codabrate_events::EventBus::default());

    let state = AppState {
        pool,
        config: Arc::new(config),
        ws_manager,
        event_bus,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request against a fresh router built off the pool.
pub async fn request(
    pool: &PgPool,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let app = build_test_app(pool.clone());

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(pool: &PgPool, uri: &str, token: Option<&str>) -> Response {
    request(pool, Method::GET, uri, token, None).await
}

pub async fn post_json(
    pool: &PgPool,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    request(pool, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(
    pool: &PgPool,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    request(pool, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(pool: &PgPool, uri: &str, token: Option<&str>) -> Response {
    request(pool, Method::DELETE, uri, token, None).await
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Account fixtures
// ---------------------------------------------------------------------------

/// Password used by every test account.
pub const TEST_PASSWORD: &str = "parola-sifre-1";

/// Register a user through the API, returning their id.
pub async fn register_user(pool: &PgPool, username: &str) -> i64 {
    let response = post_json(
        pool,
        "/api/v1/auth/register",
        None,
        serde_json::json!({
            "username": username,
            "full_name": format!("{username} test"),
            "email": format!("{username}@ornek.edu.tr"),
            "password": TEST_PASSWORD,
            "university": "Test University",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "register failed");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Log a registered user in, returning their access token.
pub async fn login_token(pool: &PgPool, username: &str) -> String {
    let response = post_json(
        pool,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "username": username, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login failed");
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register and log in, returning `(user_id, access_token)`.
pub async fn signup(pool: &PgPool, username: &str) -> (i64, String) {
    let id = register_user(pool, username).await;
    let token = login_token(pool, username).await;
    (id, token)
}
