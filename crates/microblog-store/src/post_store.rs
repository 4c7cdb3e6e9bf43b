//! Post store in insertion order.

use std::sync::Arc;

use microblog_core::error::DomainError;
use microblog_core::id::IdGenerator;
use microblog_core::model::{Like, NewPost, Post};
use microblog_core::repository::PostRepository;
use parking_lot::RwLock;
use uuid::Uuid;

const INITIAL_POSTS_CAPACITY: usize = 100;

/// Posts kept in the order they were created.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
    ids: Arc<dyn IdGenerator>,
}

impl InMemoryPostStore {
    /// Creates an empty store minting ids from `ids`.
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            posts: RwLock::new(Vec::with_capacity(INITIAL_POSTS_CAPACITY)),
            ids,
        }
    }
}

impl PostRepository for InMemoryPostStore {
    fn create_post(&self, post: NewPost) -> Result<Post, DomainError> {
        let post = Post {
            id: self.ids.next_id(),
            author_id: post.author_id,
            text: post.text,
            likes: Vec::new(),
        };
        self.posts.write().push(post.clone());
        Ok(post)
    }

    fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.read().clone())
    }

    fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(DomainError::PostNotFound(id))
    }

    fn apply_like(&self, like: &Like) -> Result<(), DomainError> {
        let mut posts = self.posts.write();
        let post = posts
            .iter_mut()
            .find(|p| p.id == like.post_id)
            .ok_or(DomainError::PostNotFound(like.post_id))?;
        post.add_like(like.user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use microblog_test_support::SequentialIdGenerator;

    fn store() -> InMemoryPostStore {
        InMemoryPostStore::new(Arc::new(SequentialIdGenerator::new()))
    }

    fn new_post(author_id: Uuid, text: &str) -> NewPost {
        NewPost {
            author_id,
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_list_posts_returns_insertion_order() {
        // Arrange
        let store = store();
        let author = Uuid::new_v4();

        // Act
        let first = store.create_post(new_post(author, "one")).unwrap();
        let second = store.create_post(new_post(author, "two")).unwrap();

        // Assert
        let posts = store.list_posts().unwrap();
        assert_eq!(posts, vec![first, second]);
        assert_eq!(posts[0].id, SequentialIdGenerator::nth(1));
        assert!(posts[0].likes.is_empty());
    }

    #[test]
    fn test_apply_like_twice_records_one_entry() {
        // Arrange
        let store = store();
        let alice = Uuid::new_v4();
        let post = store.create_post(new_post(alice, "hi")).unwrap();
        let like = Like {
            user_id: alice,
            post_id: post.id,
        };

        // Act
        store.apply_like(&like).unwrap();
        store.apply_like(&like).unwrap();

        // Assert
        assert_eq!(store.get_post(post.id).unwrap().likes, vec![alice]);
    }

    #[test]
    fn test_apply_like_to_missing_post_leaves_store_unchanged() {
        // Arrange
        let store = store();
        let author = Uuid::new_v4();
        store.create_post(new_post(author, "hi")).unwrap();
        let before = store.list_posts().unwrap();
        let missing = Uuid::new_v4();

        // Act
        let result = store.apply_like(&Like {
            user_id: author,
            post_id: missing,
        });

        // Assert
        assert_eq!(result, Err(DomainError::PostNotFound(missing)));
        assert_eq!(store.list_posts().unwrap(), before);
    }

    #[test]
    fn test_concurrent_likes_keep_likes_unique() {
        // Arrange
        let store = Arc::new(store());
        let post = store.create_post(new_post(Uuid::new_v4(), "hot")).unwrap();
        let users = (0..4).map(|_| Uuid::new_v4()).collect::<Vec<_>>();

        // Act: every user likes the post from several threads at once.
        let handles = users
            .iter()
            .flat_map(|&user_id| std::iter::repeat_n(user_id, 5))
            .map(|user_id| {
                let store = Arc::clone(&store);
                let like = Like {
                    user_id,
                    post_id: post.id,
                };
                thread::spawn(move || store.apply_like(&like))
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        // Assert
        let mut likes = store.get_post(post.id).unwrap().likes;
        likes.sort_unstable();
        let mut expected = users;
        expected.sort_unstable();
        assert_eq!(likes, expected);
    }
}
