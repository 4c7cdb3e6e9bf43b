//! Microblog: structured logging.
//!
//! Records are captured by an [`AsyncLogger`], carried through a bounded
//! [`microblog_queue::EventQueue`], and written by the [`LogSink`] through
//! whatever `tracing` subscriber the process installed. [`TracingLogger`]
//! writes the same records synchronously; it reports on the log queue
//! itself, which cannot log into itself.

mod async_logger;
mod sink;

pub use async_logger::AsyncLogger;
pub use sink::{LogSink, TracingLogger};

/// `tracing` target every record is written under.
pub const LOG_TARGET: &str = "microblog";
