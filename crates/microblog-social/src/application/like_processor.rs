//! Applying queued likes to the post store.

use std::sync::Arc;

use microblog_core::error::DomainError;
use microblog_core::log::{Logger, USER_ID_KEY, attr, error_attr};
use microblog_core::model::Like;
use microblog_core::queue::Consumer;
use microblog_core::repository::PostRepository;
use microblog_queue::{EventQueue, QueueError};

/// Name of the like queue and prefix of its worker thread.
pub const LIKE_QUEUE_NAME: &str = "likes";

/// Consumer of the like queue.
///
/// A post that vanished between the request's precheck and the worker is
/// an expected outcome: the like is logged and dropped, never retried.
pub struct LikeProcessor {
    posts: Arc<dyn PostRepository>,
    logger: Arc<dyn Logger>,
}

impl LikeProcessor {
    /// Creates a processor applying likes to `posts`.
    #[must_use]
    pub fn new(posts: Arc<dyn PostRepository>, logger: Arc<dyn Logger>) -> Self {
        Self { posts, logger }
    }

    /// Starts the like queue with a processor as its consumer. Queue-level
    /// failures are reported to `logger` as well.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Spawn` if the worker thread cannot be started.
    pub fn start_queue(
        posts: Arc<dyn PostRepository>,
        capacity: usize,
        logger: Arc<dyn Logger>,
    ) -> Result<EventQueue<Like>, QueueError> {
        let processor = Arc::new(Self::new(posts, Arc::clone(&logger)));
        EventQueue::new(LIKE_QUEUE_NAME, capacity, processor, logger)
    }
}

impl Consumer<Like> for LikeProcessor {
    fn handle(&self, like: Like) -> Result<(), DomainError> {
        match self.posts.apply_like(&like) {
            Ok(()) => {
                self.logger.debug(
                    "like applied",
                    vec![attr(USER_ID_KEY, like.user_id), attr("post_id", like.post_id)],
                );
                Ok(())
            }
            Err(err @ DomainError::PostNotFound(_)) => {
                self.logger.warn(
                    "failed to like post",
                    vec![
                        attr(USER_ID_KEY, like.user_id),
                        attr("post_id", like.post_id),
                        error_attr(&err),
                    ],
                );
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use microblog_core::id::IdGenerator;
    use microblog_core::log::LogLevel;
    use microblog_core::model::NewPost;
    use microblog_core::queue::Enqueuer;
    use microblog_queue::QueueState;
    use microblog_store::InMemoryPostStore;
    use microblog_test_support::{FailingPostRepository, RecordingLogger, SequentialIdGenerator};
    use uuid::Uuid;

    fn post_store() -> Arc<InMemoryPostStore> {
        let ids: Arc<dyn IdGenerator> = Arc::new(SequentialIdGenerator::new());
        Arc::new(InMemoryPostStore::new(ids))
    }

    fn seed_post(store: &InMemoryPostStore, author_id: Uuid) -> Uuid {
        store
            .create_post(NewPost {
                author_id,
                text: "hi".into(),
            })
            .unwrap()
            .id
    }

    #[test]
    fn test_handle_applies_like_once() {
        // Arrange
        let store = post_store();
        let alice = Uuid::new_v4();
        let post_id = seed_post(&store, alice);
        let processor = LikeProcessor::new(store.clone(), Arc::new(RecordingLogger::new()));
        let like = Like {
            user_id: alice,
            post_id,
        };

        // Act
        processor.handle(like).unwrap();
        processor.handle(like).unwrap();

        // Assert
        assert_eq!(store.get_post(post_id).unwrap().likes, vec![alice]);
    }

    #[test]
    fn test_handle_logs_and_drops_like_for_missing_post() {
        // Arrange
        let store = post_store();
        seed_post(&store, Uuid::new_v4());
        let before = store.list_posts().unwrap();
        let logger = Arc::new(RecordingLogger::new());
        let processor = LikeProcessor::new(store.clone(), logger.clone());
        let missing = Uuid::new_v4();

        // Act
        let result = processor.handle(Like {
            user_id: Uuid::new_v4(),
            post_id: missing,
        });

        // Assert
        assert!(result.is_ok());
        assert_eq!(store.list_posts().unwrap(), before);
        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Warn);
        assert_eq!(records[0].message, "failed to like post");
        assert_eq!(records[0].attr("post_id").unwrap(), &missing.to_string());
    }

    #[test]
    fn test_handle_propagates_other_store_errors() {
        let processor = LikeProcessor::new(
            Arc::new(FailingPostRepository),
            Arc::new(RecordingLogger::new()),
        );

        let result = processor.handle(Like {
            user_id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
        });

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[test]
    fn test_queue_applies_duplicate_likes_idempotently() {
        // Arrange
        let store = post_store();
        let alice = Uuid::new_v4();
        let post_id = seed_post(&store, alice);
        let queue =
            LikeProcessor::start_queue(store.clone(), 4, Arc::new(RecordingLogger::new()))
                .unwrap();
        let like = Like {
            user_id: alice,
            post_id,
        };

        // Act
        queue.enqueue(like);
        queue.enqueue(like);
        queue.close();

        // Assert
        let posts = store.list_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].likes, vec![alice]);
        assert_eq!(queue.processed(), 2);
    }

    #[test]
    fn test_queue_keeps_working_after_missing_post() {
        // Arrange
        let store = post_store();
        let alice = Uuid::new_v4();
        let post_id = seed_post(&store, alice);
        let logger = Arc::new(RecordingLogger::new());
        let queue = LikeProcessor::start_queue(store.clone(), 1, logger.clone()).unwrap();

        // Act
        queue.enqueue(Like {
            user_id: alice,
            post_id: Uuid::new_v4(),
        });
        queue.enqueue(Like {
            user_id: alice,
            post_id,
        });
        queue.close();

        // Assert
        assert_eq!(queue.state(), QueueState::Closed);
        assert_eq!(store.get_post(post_id).unwrap().likes, vec![alice]);
        assert_eq!(logger.count_message("failed to like post"), 1);
        assert_eq!(logger.count_message("failed to process queued item"), 0);
    }
}
