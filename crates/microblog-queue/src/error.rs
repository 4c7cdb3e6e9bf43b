//! Queue error types.

use thiserror::Error;

/// Errors surfaced by [`crate::EventQueue`].
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue is draining or closed and accepts no new items.
    #[error("queue {0} is closed")]
    Closed(String),

    /// The worker thread is no longer receiving.
    #[error("queue {0} worker is gone")]
    WorkerGone(String),

    /// The worker thread could not be started.
    #[error("failed to spawn worker for queue {name}: {source}")]
    Spawn {
        /// Queue name.
        name: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}
