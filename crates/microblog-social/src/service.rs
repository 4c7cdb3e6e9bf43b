//! Service facade handed to the HTTP layer.

use std::sync::Arc;

use microblog_core::error::DomainError;
use microblog_core::log::{LogContext, Logger};
use microblog_core::model::{Like, Post, User};
use microblog_core::queue::Enqueuer;
use microblog_core::repository::{PostRepository, UserRepository};
use uuid::Uuid;

use crate::application::post_service::PostService;
use crate::application::user_service::UserService;

/// User and post services behind one value; every call forwards to one of
/// the named fields.
pub struct Service {
    /// Authentication.
    pub users: UserService,
    /// Posts and likes.
    pub posts: PostService,
}

impl Service {
    /// Wires both services over the given stores.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        likes: Arc<dyn Enqueuer<Like>>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            users: UserService::new(Arc::clone(&users), Arc::clone(&logger)),
            posts: PostService::new(posts, users, likes, logger),
        }
    }

    /// See [`UserService::authenticate`].
    ///
    /// # Errors
    ///
    /// Propagates the user service's errors.
    pub fn authenticate(&self, ctx: &LogContext, name: &str) -> Result<User, DomainError> {
        self.users.authenticate(ctx, name)
    }

    /// See [`PostService::create_post`].
    ///
    /// # Errors
    ///
    /// Propagates the post service's errors.
    pub fn create_post(
        &self,
        ctx: &LogContext,
        author_id: Uuid,
        text: String,
    ) -> Result<Post, DomainError> {
        self.posts.create_post(ctx, author_id, text)
    }

    /// See [`PostService::list_posts`].
    ///
    /// # Errors
    ///
    /// Propagates the post service's errors.
    pub fn list_posts(&self, ctx: &LogContext) -> Result<Vec<Post>, DomainError> {
        self.posts.list_posts(ctx)
    }

    /// See [`PostService::like_post`].
    ///
    /// # Errors
    ///
    /// Propagates the post service's errors.
    pub fn like_post(&self, ctx: &LogContext, like: Like) -> Result<(), DomainError> {
        self.posts.like_post(ctx, like)
    }
}
