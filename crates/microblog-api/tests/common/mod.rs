//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use microblog_core::log::LogEvent;
use microblog_test_support::{FixedClock, RecordingConsumer, SequentialIdGenerator};
use tower::ServiceExt;

use microblog_api::app::Application;
use microblog_api::config::Config;

/// A fully wired application whose log records are captured in memory.
pub struct TestApp {
    pub app: Application,
    pub router: Router,
    pub logs: Arc<RecordingConsumer<LogEvent>>,
}

impl TestApp {
    /// Drains both queues. Every request has completed by the time a test
    /// calls this, so blocking the test thread is fine.
    pub fn shutdown(&self) {
        self.app.shutdown();
    }

    /// Messages of every captured log record, in write order.
    pub fn log_messages(&self) -> Vec<String> {
        self.logs.items().into_iter().map(|e| e.message).collect()
    }
}

/// Build the full app with deterministic clock and ids, using the same
/// wiring as `main.rs`.
pub fn build_test_app() -> TestApp {
    build_test_app_with(&Config::default())
}

/// Same as [`build_test_app`] with a custom config.
pub fn build_test_app_with(config: &Config) -> TestApp {
    let logs = Arc::new(RecordingConsumer::new());
    let app = Application::build_with_log_sink(
        config,
        Arc::new(FixedClock::default()),
        Arc::new(SequentialIdGenerator::new()),
        logs.clone(),
    )
    .unwrap();
    let router = app.router(Duration::from_secs(5));

    TestApp { app, router, logs }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Register `name` and return its id.
pub async fn login(app: &Router, name: &str) -> String {
    let (status, json) = post_json(app, "/api/v1/users", &serde_json::json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_owned()
}

/// Create a post by `author_id` and return its id.
pub async fn create_post(app: &Router, author_id: &str, text: &str) -> String {
    let (status, json) = post_json(
        app,
        "/api/v1/posts",
        &serde_json::json!({ "author_id": author_id, "text": text }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_owned()
}
