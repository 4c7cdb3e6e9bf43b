//! Routes for posts and likes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use microblog_core::log::LogContext;
use microblog_core::model::{Like, Post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::run_service;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    /// The author; must be a registered user.
    pub author_id: Uuid,
    /// Post body.
    pub text: String,
}

/// Request body for POST /{post_id}/like.
#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    /// The liking user.
    pub user_id: Uuid,
}

/// A post as returned to clients.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// Post id.
    pub id: Uuid,
    /// Author id.
    pub author_id: Uuid,
    /// Post body.
    pub text: String,
    /// Ids of the users who liked the post, in the order the likes landed.
    pub likes: Vec<Uuid>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            text: post.text,
            likes: post.likes,
        }
    }
}

/// Response body for an accepted like. The like is applied later.
#[derive(Debug, Serialize)]
pub struct LikeAccepted {
    /// Liked post.
    pub post_id: Uuid,
    /// Liking user.
    pub user_id: Uuid,
}

/// POST /
#[instrument(skip(state, request), fields(author_id = %request.author_id))]
async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let ctx = LogContext::for_request(Uuid::new_v4()).with_user(request.author_id);
    info!(request_id = ?ctx.request_id, "handling create_post request");

    let service = Arc::clone(&state.service);
    let post = run_service(&state, ctx, "create_post", move || {
        service.create_post(&ctx, request.author_id, request.text)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// GET /
#[instrument(skip(state))]
async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let ctx = LogContext::for_request(Uuid::new_v4());

    let service = Arc::clone(&state.service);
    let posts = run_service(&state, ctx, "list_posts", move || service.list_posts(&ctx)).await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// POST /{post_id}/like
#[instrument(skip(state, request), fields(user_id = %request.user_id))]
async fn like_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Json(request): Json<LikeRequest>,
) -> Result<(StatusCode, Json<LikeAccepted>), ApiError> {
    let ctx = LogContext::for_request(Uuid::new_v4()).with_user(request.user_id);
    info!(request_id = ?ctx.request_id, "handling like_post request");

    let like = Like {
        user_id: request.user_id,
        post_id,
    };
    let service = Arc::clone(&state.service);
    run_service(&state, ctx, "like_post", move || service.like_post(&ctx, like)).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(LikeAccepted {
            post_id,
            user_id: like.user_id,
        }),
    ))
}

/// Returns the router for posts.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{post_id}/like", post(like_post))
}
