//! Routes for user authentication.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use microblog_core::log::LogContext;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::run_service;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    /// User name to log in as; registered on first use.
    pub name: String,
}

/// Response body for an authenticated user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// The user's id.
    pub id: Uuid,
}

/// POST /
#[instrument(skip(state, request), fields(name = %request.name))]
async fn authenticate(
    State(state): State<AppState>,
    Json(request): Json<AuthenticateRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let ctx = LogContext::for_request(Uuid::new_v4());
    info!(request_id = ?ctx.request_id, "handling authenticate request");

    let service = Arc::clone(&state.service);
    let user = run_service(&state, ctx, "authenticate", move || {
        service.authenticate(&ctx, &request.name)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(UserResponse { id: user.id })))
}

/// Returns the router for users.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(authenticate))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use microblog_core::id::IdGenerator;
    use microblog_core::log::{LogLevel, Logger};
    use microblog_social::Service;
    use microblog_social::application::like_processor::LikeProcessor;
    use microblog_store::InMemoryPostStore;
    use microblog_test_support::{FailingUserRepository, RecordingLogger, SequentialIdGenerator};
    use serde_json::Value;
    use tower::ServiceExt;

    fn failing_state(logger: Arc<RecordingLogger>) -> AppState {
        let ids: Arc<dyn IdGenerator> = Arc::new(SequentialIdGenerator::new());
        let posts = Arc::new(InMemoryPostStore::new(ids));
        let likes = Arc::new(LikeProcessor::start_queue(posts.clone(), 1, logger.clone()).unwrap());
        let logger: Arc<dyn Logger> = logger;
        let service = Service::new(
            Arc::new(FailingUserRepository),
            posts,
            likes.clone(),
            Arc::clone(&logger),
        );
        AppState::new(Arc::new(service), logger, likes)
    }

    #[tokio::test]
    async fn test_authenticate_store_failure_returns_500_and_logs_error() {
        // Arrange
        let logger = Arc::new(RecordingLogger::new());
        let app = router().with_state(failing_state(logger.clone()));
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"vova"}"#))
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "infrastructure_error");

        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Error);
        assert_eq!(records[0].message, "request failed");
        assert_eq!(records[0].attr("operation").unwrap(), "authenticate");
        assert!(records[0].context.request_id.is_some());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_malformed_body() {
        let app = router().with_state(failing_state(Arc::new(RecordingLogger::new())));
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"nickname":"vova"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
