//! Test repositories: repositories that always fail, for error paths.

use microblog_core::error::DomainError;
use microblog_core::model::{Like, NewPost, Post, User};
use microblog_core::repository::{PostRepository, UserRepository};
use uuid::Uuid;

fn unavailable() -> DomainError {
    DomainError::Infrastructure("store unavailable".into())
}

/// A user repository whose every call returns an infrastructure error.
#[derive(Debug)]
pub struct FailingUserRepository;

impl UserRepository for FailingUserRepository {
    fn create_user(&self, _name: &str) -> Result<User, DomainError> {
        Err(unavailable())
    }

    fn get_user_by_name(&self, _name: &str) -> Result<Option<User>, DomainError> {
        Err(unavailable())
    }

    fn get_user_by_id(&self, _id: Uuid) -> Result<User, DomainError> {
        Err(unavailable())
    }
}

/// A post repository whose every call returns an infrastructure error.
#[derive(Debug)]
pub struct FailingPostRepository;

impl PostRepository for FailingPostRepository {
    fn create_post(&self, _post: NewPost) -> Result<Post, DomainError> {
        Err(unavailable())
    }

    fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        Err(unavailable())
    }

    fn get_post(&self, _id: Uuid) -> Result<Post, DomainError> {
        Err(unavailable())
    }

    fn apply_like(&self, _like: &Like) -> Result<(), DomainError> {
        Err(unavailable())
    }
}
