//! Microblog: bounded event queue.
//!
//! An [`EventQueue`] hands items from any number of producers to a single
//! dedicated worker thread, in submission order. The buffer is bounded:
//! producers block while it is full. Closing the queue stops acceptance,
//! lets the worker drain everything already buffered, and waits for it to
//! exit.

mod error;
mod event_queue;

pub use error::QueueError;
pub use event_queue::{EventQueue, QueueState};
