//! Capability traits at the two ends of an event queue.

use crate::error::DomainError;

/// Processes items pulled off a queue, one at a time.
///
/// Errors are reported by the queue and never reach the producer.
pub trait Consumer<T>: Send + Sync {
    /// Handles a single item.
    ///
    /// # Errors
    ///
    /// Any `DomainError`; the queue logs it and moves on to the next item.
    fn handle(&self, item: T) -> Result<(), DomainError>;
}

/// Accepts items for asynchronous processing.
pub trait Enqueuer<T>: Send + Sync {
    /// Submits `item`. Does not report failure: a rejected item is logged
    /// by the implementation and dropped.
    fn enqueue(&self, item: T);
}
