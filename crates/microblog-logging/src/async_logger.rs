//! Logger that defers writing to a dedicated queue worker.

use std::sync::Arc;

use microblog_core::clock::Clock;
use microblog_core::log::{Attr, LogContext, LogEvent, LogLevel, Logger};
use microblog_core::queue::{Consumer, Enqueuer};
use microblog_queue::{EventQueue, QueueError};

use crate::sink::{LogSink, TracingLogger};

/// Name of the log queue and prefix of its worker thread.
const QUEUE_NAME: &str = "logs";

/// Captures records on the caller's thread and writes them from the log
/// queue's worker.
///
/// Loggers derived with [`Logger::with`] share the queue. Call
/// [`AsyncLogger::close`] during shutdown, after every other queue that logs
/// through this one has been closed, so their final records are written.
pub struct AsyncLogger {
    queue: Arc<EventQueue<LogEvent>>,
    clock: Arc<dyn Clock>,
    base_attrs: Vec<Attr>,
}

impl AsyncLogger {
    /// Starts a log queue of `capacity` records writing to [`LogSink`].
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Spawn` if the worker thread cannot be started.
    pub fn start(capacity: usize, clock: Arc<dyn Clock>) -> Result<Self, QueueError> {
        Self::with_sink(capacity, clock, Arc::new(LogSink))
    }

    /// Starts a log queue handing records to `sink`.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Spawn` if the worker thread cannot be started.
    pub fn with_sink(
        capacity: usize,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn Consumer<LogEvent>>,
    ) -> Result<Self, QueueError> {
        let diagnostics = Arc::new(TracingLogger::new(Arc::clone(&clock)));
        let queue = EventQueue::new(QUEUE_NAME, capacity, sink, diagnostics)?;
        Ok(Self {
            queue: Arc::new(queue),
            clock,
            base_attrs: Vec::new(),
        })
    }

    /// Drains every captured record and stops the worker.
    pub fn close(&self) {
        self.queue.close();
    }
}

impl Logger for AsyncLogger {
    fn log(&self, ctx: &LogContext, level: LogLevel, message: &str, attrs: Vec<Attr>) {
        let mut all = self.base_attrs.clone();
        all.extend(attrs);
        self.queue.enqueue(LogEvent {
            context: *ctx,
            level,
            message: message.to_owned(),
            attrs: all,
            occurred_at: self.clock.now(),
        });
    }

    fn with(&self, attrs: Vec<Attr>) -> Arc<dyn Logger> {
        let mut base_attrs = self.base_attrs.clone();
        base_attrs.extend(attrs);
        Arc::new(Self {
            queue: Arc::clone(&self.queue),
            clock: Arc::clone(&self.clock),
            base_attrs,
        })
    }
}
