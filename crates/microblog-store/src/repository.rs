//! Repository facade over the user and post stores.

use std::sync::Arc;

use microblog_core::error::DomainError;
use microblog_core::id::IdGenerator;
use microblog_core::model::{Like, NewPost, Post, User};
use microblog_core::repository::{PostRepository, UserRepository};
use uuid::Uuid;

use crate::post_store::InMemoryPostStore;
use crate::user_store::InMemoryUserStore;

/// Both stores behind one value. Each call is forwarded to exactly one of
/// the named fields.
#[derive(Clone)]
pub struct Repository {
    /// User storage.
    pub users: Arc<dyn UserRepository>,
    /// Post storage.
    pub posts: Arc<dyn PostRepository>,
}

impl Repository {
    /// Creates a facade over the given stores.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { users, posts }
    }

    /// Creates empty in-memory stores sharing one id generator.
    #[must_use]
    pub fn in_memory(ids: Arc<dyn IdGenerator>) -> Self {
        Self::new(
            Arc::new(InMemoryUserStore::new(Arc::clone(&ids))),
            Arc::new(InMemoryPostStore::new(ids)),
        )
    }
}

impl UserRepository for Repository {
    fn create_user(&self, name: &str) -> Result<User, DomainError> {
        self.users.create_user(name)
    }

    fn get_user_by_name(&self, name: &str) -> Result<Option<User>, DomainError> {
        self.users.get_user_by_name(name)
    }

    fn get_user_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        self.users.get_user_by_id(id)
    }
}

impl PostRepository for Repository {
    fn create_post(&self, post: NewPost) -> Result<Post, DomainError> {
        self.posts.create_post(post)
    }

    fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.list_posts()
    }

    fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts.get_post(id)
    }

    fn apply_like(&self, like: &Like) -> Result<(), DomainError> {
        self.posts.apply_like(like)
    }
}
