//! Structured logging capability.
//!
//! Components never reach for a process-wide logger; they are handed an
//! `Arc<dyn Logger>` at construction. Records carry a severity, a message,
//! structured attributes, and an optional request context whose fields are
//! attached to the written record.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Attribute key used for error descriptions.
pub const ERROR_KEY: &str = "error";

/// Attribute key used for the acting user.
pub const USER_ID_KEY: &str = "user_id";

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug,
    /// Normal operation.
    Info,
    /// Something unexpected that the system recovered from.
    Warn,
    /// An operation failed.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Request-scoped correlation data carried alongside a log record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogContext {
    /// The user the request acts on behalf of, when known.
    pub user_id: Option<Uuid>,
    /// Correlates every record produced while serving one request.
    pub request_id: Option<Uuid>,
}

impl LogContext {
    /// A context for a fresh request.
    #[must_use]
    pub fn for_request(request_id: Uuid) -> Self {
        Self {
            user_id: None,
            request_id: Some(request_id),
        }
    }

    /// Returns a copy of this context bound to `user_id`.
    #[must_use]
    pub fn with_user(self, user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..self
        }
    }
}

/// A single structured key/value pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attr {
    /// Attribute name.
    pub key: String,
    /// Attribute value.
    pub value: Value,
}

/// Builds an attribute. Values that fail to serialize become `null`.
pub fn attr(key: impl Into<String>, value: impl Serialize) -> Attr {
    Attr {
        key: key.into(),
        value: serde_json::to_value(value).unwrap_or(Value::Null),
    }
}

/// Builds the conventional `error` attribute from anything displayable.
pub fn error_attr(err: &dyn fmt::Display) -> Attr {
    attr(ERROR_KEY, err.to_string())
}

/// A captured log record, ready to be written by a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    /// Correlation data of the emitting request.
    pub context: LogContext,
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
    /// Structured attributes, base attributes first.
    pub attrs: Vec<Attr>,
    /// When the record was captured by the producer.
    pub occurred_at: DateTime<Utc>,
}

impl LogEvent {
    /// Renders the attributes as a single JSON object. Later keys win.
    #[must_use]
    pub fn attrs_json(&self) -> Value {
        let map = self
            .attrs
            .iter()
            .map(|a| (a.key.clone(), a.value.clone()))
            .collect::<serde_json::Map<_, _>>();
        Value::Object(map)
    }
}

/// Logging capability injected into every component.
pub trait Logger: Send + Sync {
    /// Emits a record. Never fails; implementations swallow their own
    /// output errors.
    fn log(&self, ctx: &LogContext, level: LogLevel, message: &str, attrs: Vec<Attr>);

    /// Returns a logger that prepends `attrs` to every record.
    fn with(&self, attrs: Vec<Attr>) -> Arc<dyn Logger>;

    /// Emits a debug record without request context.
    fn debug(&self, message: &str, attrs: Vec<Attr>) {
        self.log(&LogContext::default(), LogLevel::Debug, message, attrs);
    }

    /// Emits an info record without request context.
    fn info(&self, message: &str, attrs: Vec<Attr>) {
        self.log(&LogContext::default(), LogLevel::Info, message, attrs);
    }

    /// Emits a warning record without request context.
    fn warn(&self, message: &str, attrs: Vec<Attr>) {
        self.log(&LogContext::default(), LogLevel::Warn, message, attrs);
    }

    /// Emits an error record without request context.
    fn error(&self, message: &str, attrs: Vec<Attr>) {
        self.log(&LogContext::default(), LogLevel::Error, message, attrs);
    }

    /// Emits an info record carrying `ctx`.
    fn info_ctx(&self, ctx: &LogContext, message: &str, attrs: Vec<Attr>) {
        self.log(ctx, LogLevel::Info, message, attrs);
    }

    /// Emits an error record carrying `ctx`.
    fn error_ctx(&self, ctx: &LogContext, message: &str, attrs: Vec<Attr>) {
        self.log(ctx, LogLevel::Error, message, attrs);
    }
}
