//! Shared test doubles and utilities for the Microblog service.

mod clock;
mod id;
mod logger;
mod queue;
mod repository;

pub use clock::FixedClock;
pub use id::SequentialIdGenerator;
pub use logger::{RecordedLog, RecordingLogger};
pub use queue::{RecordingConsumer, RecordingEnqueuer};
pub use repository::{FailingPostRepository, FailingUserRepository};
