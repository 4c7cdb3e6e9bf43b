//! Post creation, listing and like submission.

use std::sync::Arc;

use microblog_core::error::DomainError;
use microblog_core::log::{LogContext, Logger, attr};
use microblog_core::model::{Like, NewPost, Post};
use microblog_core::queue::Enqueuer;
use microblog_core::repository::{PostRepository, UserRepository};
use uuid::Uuid;

/// User-facing operations on the post store.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    likes: Arc<dyn Enqueuer<Like>>,
    logger: Arc<dyn Logger>,
}

impl PostService {
    /// Creates the service. Likes are handed to `likes` rather than applied
    /// inline.
    #[must_use]
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        likes: Arc<dyn Enqueuer<Like>>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            posts,
            users,
            likes,
            logger,
        }
    }

    /// Stores a post written by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UserNotFound` if the author is unknown.
    pub fn create_post(
        &self,
        ctx: &LogContext,
        author_id: Uuid,
        text: String,
    ) -> Result<Post, DomainError> {
        self.users.get_user_by_id(author_id)?;

        let post = self.posts.create_post(NewPost { author_id, text })?;
        self.logger.info_ctx(
            &ctx.with_user(author_id),
            "post created",
            vec![attr("post_id", post.id)],
        );
        Ok(post)
    }

    /// Returns every post in creation order.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn list_posts(&self, _ctx: &LogContext) -> Result<Vec<Post>, DomainError> {
        self.posts.list_posts()
    }

    /// Checks that both sides of `like` exist, then queues it. The like is
    /// applied later by the like queue's worker.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UserNotFound` or `DomainError::PostNotFound`
    /// when the precheck fails; nothing is queued in that case.
    pub fn like_post(&self, ctx: &LogContext, like: Like) -> Result<(), DomainError> {
        self.users.get_user_by_id(like.user_id)?;
        self.posts.get_post(like.post_id)?;

        self.likes.enqueue(like);
        self.logger.info_ctx(
            &ctx.with_user(like.user_id),
            "like queued",
            vec![attr("post_id", like.post_id)],
        );
        Ok(())
    }
}
