//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use microblog_queue::QueueState;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` while likes are accepted, `draining` once shutdown has begun.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Likes handled (applied or dropped) since startup.
    pub likes_processed: u64,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = match state.likes.state() {
        QueueState::Running => "ok",
        QueueState::Draining | QueueState::Closed => "draining",
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        likes_processed: state.likes.processed(),
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
