//! Test queue endpoints: a recording consumer and a recording enqueuer.

use microblog_core::error::DomainError;
use microblog_core::queue::{Consumer, Enqueuer};
use parking_lot::Mutex;

/// A consumer that records every item it is handed and always succeeds.
#[derive(Debug)]
pub struct RecordingConsumer<T> {
    items: Mutex<Vec<T>>,
}

impl<T> RecordingConsumer<T> {
    /// Creates a consumer with no recorded items.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Default for RecordingConsumer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> RecordingConsumer<T> {
    /// Returns a snapshot of the handled items, in handling order.
    pub fn items(&self) -> Vec<T> {
        self.items.lock().clone()
    }
}

impl<T: Send> Consumer<T> for RecordingConsumer<T> {
    fn handle(&self, item: T) -> Result<(), DomainError> {
        self.items.lock().push(item);
        Ok(())
    }
}

/// An enqueuer that records submissions without processing them. Stands in
/// for a real queue in service tests.
#[derive(Debug)]
pub struct RecordingEnqueuer<T> {
    items: Mutex<Vec<T>>,
}

impl<T> RecordingEnqueuer<T> {
    /// Creates an enqueuer with no recorded items.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Default for RecordingEnqueuer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> RecordingEnqueuer<T> {
    /// Returns a snapshot of the submitted items, in submission order.
    pub fn items(&self) -> Vec<T> {
        self.items.lock().clone()
    }
}

impl<T: Send> Enqueuer<T> for RecordingEnqueuer<T> {
    fn enqueue(&self, item: T) {
        self.items.lock().push(item);
    }
}
