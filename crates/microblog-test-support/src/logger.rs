//! Test logger: captures records instead of writing them.

use std::sync::Arc;

use microblog_core::log::{Attr, LogContext, LogLevel, Logger};
use parking_lot::Mutex;
use serde_json::Value;

/// A record captured by [`RecordingLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLog {
    /// Context the record was emitted with.
    pub context: LogContext,
    /// Severity.
    pub level: LogLevel,
    /// Message text.
    pub message: String,
    /// Attributes, base attributes first.
    pub attrs: Vec<Attr>,
}

impl RecordedLog {
    /// Returns the value of the last attribute named `key`.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.iter().rev().find(|a| a.key == key).map(|a| &a.value)
    }
}

/// A logger that keeps every record in memory. Loggers derived with
/// [`Logger::with`] share the same record list.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Arc<Mutex<Vec<RecordedLog>>>,
    base_attrs: Vec<Attr>,
}

impl RecordingLogger {
    /// Creates an empty recording logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every captured record.
    pub fn records(&self) -> Vec<RecordedLog> {
        self.records.lock().clone()
    }

    /// Number of records whose message equals `message`.
    pub fn count_message(&self, message: &str) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|r| r.message == message)
            .count()
    }

    /// Number of records at `level`.
    pub fn count_level(&self, level: LogLevel) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .count()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, ctx: &LogContext, level: LogLevel, message: &str, attrs: Vec<Attr>) {
        let mut all = self.base_attrs.clone();
        all.extend(attrs);
        self.records.lock().push(RecordedLog {
            context: *ctx,
            level,
            message: message.to_owned(),
            attrs: all,
        });
    }

    fn with(&self, attrs: Vec<Attr>) -> Arc<dyn Logger> {
        let mut base_attrs = self.base_attrs.clone();
        base_attrs.extend(attrs);
        Arc::new(Self {
            records: Arc::clone(&self.records),
            base_attrs,
        })
    }
}
