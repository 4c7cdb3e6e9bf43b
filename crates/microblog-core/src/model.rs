//! Domain model: users, posts and likes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. Names are unique across the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Unique display name, also the login key.
    pub name: String,
}

/// A post together with the users who liked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// The user who wrote the post.
    pub author_id: Uuid,
    /// Post body.
    pub text: String,
    /// Users who liked the post, in first-like order, without duplicates.
    pub likes: Vec<Uuid>,
}

impl Post {
    /// Records a like from `user_id`. Returns `false` when the user had
    /// already liked the post, in which case nothing changes.
    pub fn add_like(&mut self, user_id: Uuid) -> bool {
        if self.likes.contains(&user_id) {
            return false;
        }
        self.likes.push(user_id);
        true
    }
}

/// Input for creating a post; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// The user who wrote the post.
    pub author_id: Uuid,
    /// Post body.
    pub text: String,
}

/// A request from `user_id` to like `post_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    /// The liking user.
    pub user_id: Uuid,
    /// The liked post.
    pub post_id: Uuid,
}
