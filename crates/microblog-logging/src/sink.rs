//! Writing records through `tracing`.

use std::sync::Arc;

use microblog_core::clock::Clock;
use microblog_core::error::DomainError;
use microblog_core::log::{Attr, LogContext, LogEvent, LogLevel, Logger};
use microblog_core::queue::Consumer;
use tracing::Level;

use crate::LOG_TARGET;

/// Final stage of the log pipeline: formats one record and hands it to the
/// installed `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl LogSink {
    /// Writes `event`. Context fields are only present when set.
    pub fn write(event: &LogEvent) {
        let attrs = event.attrs_json().to_string();
        let occurred_at = event.occurred_at.to_rfc3339();
        let user_id = event.context.user_id.map(|id| id.to_string());
        let request_id = event.context.request_id.map(|id| id.to_string());

        macro_rules! emit {
            ($level:expr) => {
                tracing::event!(
                    target: LOG_TARGET,
                    $level,
                    occurred_at = %occurred_at,
                    user_id = user_id.as_deref(),
                    request_id = request_id.as_deref(),
                    attrs = %attrs,
                    "{}",
                    event.message
                )
            };
        }

        match event.level {
            LogLevel::Debug => emit!(Level::DEBUG),
            LogLevel::Info => emit!(Level::INFO),
            LogLevel::Warn => emit!(Level::WARN),
            LogLevel::Error => emit!(Level::ERROR),
        }
    }
}

impl Consumer<LogEvent> for LogSink {
    fn handle(&self, item: LogEvent) -> Result<(), DomainError> {
        Self::write(&item);
        Ok(())
    }
}

/// A logger that writes each record immediately on the calling thread.
pub struct TracingLogger {
    clock: Arc<dyn Clock>,
    base_attrs: Vec<Attr>,
}

impl TracingLogger {
    /// Creates a logger stamping records with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            base_attrs: Vec::new(),
        }
    }
}

impl Logger for TracingLogger {
    fn log(&self, ctx: &LogContext, level: LogLevel, message: &str, attrs: Vec<Attr>) {
        let mut all = self.base_attrs.clone();
        all.extend(attrs);
        LogSink::write(&LogEvent {
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
            clock: Arc::clone(&self.clock),
            base_attrs,
        })
    }
}
