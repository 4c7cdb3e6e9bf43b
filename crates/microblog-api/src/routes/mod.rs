//! Route modules organized by resource.

pub mod health;
pub mod posts;
pub mod users;

use std::sync::Arc;

use microblog_core::error::DomainError;
use microblog_core::log::{LogContext, LogLevel, Logger, attr, error_attr};

use crate::error::ApiError;
use crate::state::AppState;

/// Runs a service call on the blocking pool. Store locks, queue
/// backpressure and the log queue all block the calling thread, so neither
/// the call nor its failure log runs on an async worker. Failures are
/// logged against `ctx` before being returned.
pub(crate) async fn run_service<F, T>(
    state: &AppState,
    ctx: LogContext,
    operation: &'static str,
    call: F,
) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    let logger = Arc::clone(&state.logger);
    let task = move || {
        let result = call();
        if let Err(err) = &result {
            log_failure(logger.as_ref(), &ctx, operation, err);
        }
        result
    };

    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(join_err) => {
            let err = DomainError::Infrastructure(format!("{operation}: {join_err}"));
            let logger = Arc::clone(&state.logger);
            let detail = err.clone();
            // The task died before logging; log from the blocking pool instead.
            let _ = tokio::task::spawn_blocking(move || {
                log_failure(logger.as_ref(), &ctx, operation, &detail);
            })
            .await;
            Err(ApiError(err))
        }
    }
}

fn log_failure(logger: &dyn Logger, ctx: &LogContext, operation: &str, err: &DomainError) {
    let level = match err {
        DomainError::Infrastructure(_) => LogLevel::Error,
        _ => LogLevel::Warn,
    };
    logger.log(
        ctx,
        level,
        "request failed",
        vec![attr("operation", operation), error_attr(err)],
    );
}
