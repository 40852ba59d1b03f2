use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use taskhub::router::init_router;
use taskhub::state::AppState;
use taskhub_config::{CorsConfig, JwtConfig};

pub const TEST_JWT_KEY: &str = "integration-test-signing-key-0123456789";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_JWT_KEY, "taskhub", "taskhub-clients").unwrap()
}

/// Full router over a freshly seeded in-memory store.
pub fn setup_test_app() -> Router {
    let state = AppState::in_memory(&test_jwt_config(), CorsConfig::default());
    init_router(state)
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Logs in through the API and returns the issued token.
#[allow(dead_code)]
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "Username": username, "Password": password }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["Token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[allow(dead_code)]
pub fn assert_envelope(body: &Value, status: u16, message: &str) {
    assert_eq!(body, &json!({ "StatusCode": status, "Message": message }));
}
