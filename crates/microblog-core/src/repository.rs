//! Repository abstractions for users and posts.
//!
//! Implementations guard their collections internally; callers never see a
//! lock. Every method is synchronous and touches exactly one store.

use uuid::Uuid;

use crate::error::DomainError;
use crate::model::{Like, NewPost, Post, User};

/// Storage for registered users.
pub trait UserRepository: Send + Sync {
    /// Registers a user under `name` and returns it with its new id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UserAlreadyExists` if the name is taken.
    fn create_user(&self, name: &str) -> Result<User, DomainError>;

    /// Looks a user up by name. A miss is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the backing store fails.
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>, DomainError>;

    /// Looks a user up by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UserNotFound` if no user has this id.
    fn get_user_by_id(&self, id: Uuid) -> Result<User, DomainError>;
}

/// Storage for posts and their likes.
pub trait PostRepository: Send + Sync {
    /// Stores a new post and returns it with its new id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the backing store fails.
    fn create_post(&self, post: NewPost) -> Result<Post, DomainError>;

    /// Returns every post in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the backing store fails.
    fn list_posts(&self) -> Result<Vec<Post>, DomainError>;

    /// Looks a post up by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PostNotFound` if no post has this id.
    fn get_post(&self, id: Uuid) -> Result<Post, DomainError>;

    /// Adds `like.user_id` to the post's likes. Repeating a like is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PostNotFound` if no post has `like.post_id`.
    fn apply_like(&self, like: &Like) -> Result<(), DomainError>;
}
