//! The bounded queue and its worker thread.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use microblog_core::log::{Logger, attr, error_attr};
use microblog_core::queue::{Consumer, Enqueuer};
use parking_lot::Mutex;

use crate::error::QueueError;

/// Lifecycle of an [`EventQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// Accepting items.
    Running,
    /// `close` has been called; buffered items are still being processed.
    Draining,
    /// The worker has exited.
    Closed,
}

struct Inner<T> {
    state: QueueState,
    sender: Option<Sender<T>>,
}

/// A bounded multi-producer, single-consumer queue with a dedicated worker.
///
/// Items are handed to the consumer one at a time, in the order their
/// submissions were accepted. A full buffer blocks the producer. After
/// [`EventQueue::close`] begins, new submissions are rejected while every
/// accepted item is still processed.
pub struct EventQueue<T> {
    name: String,
    capacity: usize,
    inner: Mutex<Inner<T>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    processed: Arc<AtomicU64>,
    diagnostics: Arc<dyn Logger>,
}

impl<T: Send + 'static> EventQueue<T> {
    /// Creates the queue and starts its worker thread.
    ///
    /// A `capacity` below 1 is raised to 1. Handler errors, handler panics
    /// and rejected submissions are reported to `diagnostics`.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Spawn` if the worker thread cannot be started.
    pub fn new(
        name: impl Into<String>,
        capacity: usize,
        consumer: Arc<dyn Consumer<T>>,
        diagnostics: Arc<dyn Logger>,
    ) -> Result<Self, QueueError> {
        let name = name.into();
        let capacity = capacity.max(1);
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        let processed = Arc::new(AtomicU64::new(0));

        let worker = Worker {
            queue: name.clone(),
            receiver,
            consumer,
            processed: Arc::clone(&processed),
            diagnostics: Arc::clone(&diagnostics),
        };
        let handle = thread::Builder::new()
            .name(format!("{name}-worker"))
            .spawn(move || worker.run())
            .map_err(|source| QueueError::Spawn {
                name: name.clone(),
                source,
            })?;

        diagnostics.debug(
            "queue started",
            vec![attr("queue", &name), attr("capacity", capacity)],
        );

        Ok(Self {
            name,
            capacity,
            inner: Mutex::new(Inner {
                state: QueueState::Running,
                sender: Some(sender),
            }),
            worker: Mutex::new(Some(handle)),
            processed,
            diagnostics,
        })
    }

    /// Submits `item`, blocking while the buffer is full.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Closed` once `close` has begun, and
    /// `QueueError::WorkerGone` if the worker stopped receiving.
    pub fn submit(&self, item: T) -> Result<(), QueueError> {
        // Clone the sender under the lock so a full buffer never holds the
        // lock; `close` can still proceed while this producer waits.
        let sender = {
            let inner = self.inner.lock();
            match (&inner.sender, inner.state) {
                (Some(sender), QueueState::Running) => sender.clone(),
                _ => return Err(QueueError::Closed(self.name.clone())),
            }
        };

        sender
            .send(item)
            .map_err(|_| QueueError::WorkerGone(self.name.clone()))
    }

    /// Stops acceptance, drains buffered items and waits for the worker to
    /// exit. Later calls return immediately; concurrent callers all wait for
    /// the drain to finish.
    ///
    /// Must not be called from inside the queue's own consumer.
    pub fn close(&self) {
        let mut worker = self.worker.lock();
        let Some(handle) = worker.take() else {
            return;
        };

        {
            let mut inner = self.inner.lock();
            inner.state = QueueState::Draining;
            inner.sender = None;
        }

        // The worker loop ends once every sender (ours and any clone held by
        // an in-flight producer) is dropped and the buffer is empty.
        if handle.join().is_err() {
            self.diagnostics
                .error("queue worker terminated abnormally", vec![attr("queue", &self.name)]);
        }

        self.inner.lock().state = QueueState::Closed;
        self.diagnostics.info(
            "queue closed",
            vec![attr("queue", &self.name), attr("processed", self.processed())],
        );
    }
}

impl<T> EventQueue<T> {
    /// The queue's name, used in diagnostics and the worker thread name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> QueueState {
        self.inner.lock().state
    }

    /// Number of items the worker has finished handling, successfully or not.
    #[must_use]
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Acquire)
    }
}

impl<T: Send + 'static> Enqueuer<T> for EventQueue<T> {
    fn enqueue(&self, item: T) {
        match self.submit(item) {
            Ok(()) => {}
            Err(QueueError::Closed(_)) => {
                self.diagnostics.warn(
                    "queue is closed; skipping enqueue",
                    vec![attr("queue", &self.name)],
                );
            }
            Err(err) => {
                self.diagnostics
                    .error("enqueue failed", vec![attr("queue", &self.name), error_attr(&err)]);
            }
        }
    }
}

impl<T> Drop for EventQueue<T> {
    fn drop(&mut self) {
        // Without an explicit close the worker still drains once our sender
        // drops; joining here keeps shutdown ordering deterministic.
        self.inner.get_mut().sender = None;
        if let Some(handle) = self.worker.get_mut().take() {
            if handle.join().is_err() {
                self.diagnostics.error(
                    "queue worker terminated abnormally",
                    vec![attr("queue", &self.name)],
                );
            }
        }
    }
}

struct Worker<T> {
    queue: String,
    receiver: Receiver<T>,
    consumer: Arc<dyn Consumer<T>>,
    processed: Arc<AtomicU64>,
    diagnostics: Arc<dyn Logger>,
}

impl<T> Worker<T> {
    fn run(self) {
        for item in &self.receiver {
            self.process(item);
            self.processed.fetch_add(1, Ordering::AcqRel);
        }
    }

    fn process(&self, item: T) {
        match panic::catch_unwind(AssertUnwindSafe(|| self.consumer.handle(item))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                self.diagnostics.error(
                    "failed to process queued item",
                    vec![attr("queue", &self.queue), error_attr(&err)],
                );
            }
            Err(payload) => {
                self.diagnostics.error(
                    "queue consumer panicked; item dropped",
                    vec![
                        attr("queue", &self.queue),
                        attr("panic", panic_message(payload.as_ref())),
                        attr(
                            "thread",
                            thread::current().name().unwrap_or("unnamed").to_owned(),
                        ),
                    ],
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
