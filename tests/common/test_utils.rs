use super::mocks::MockLlmClient;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use sketch_guess::{
    config::UpstreamConfig,
    guess::GuessRelay,
    llm::LlmClient,
    server,
};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

pub const ACCESS_CODE: &str = "correct";
pub const SAMPLE_IMAGE: &str = "data:image/png;base64,AAAA";
pub const TEST_BODY_LIMIT: usize = 64 * 1024;

/// Router with a configured access code and the given mock upstream.
pub fn create_test_app(llm: Arc<MockLlmClient>) -> Router {
    create_app(Some(ACCESS_CODE), Some(llm))
}

/// Router with full control over which secrets are present.
pub fn create_app(access_code: Option<&str>, llm: Option<Arc<MockLlmClient>>) -> Router {
    let relay = GuessRelay::new(
        access_code.map(str::to_string),
        UpstreamConfig::default(),
        llm.map(|client| client as Arc<dyn LlmClient>),
    );
    server::router(Arc::new(relay), TEST_BODY_LIMIT)
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    raw_request(uri, body.to_string())
}

pub fn raw_request(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn post_guess(app: Router, body: Value) -> (StatusCode, Value) {
    send(app, json_request("/api/guess", &body)).await
}
