//! Process wiring: queues, stores, services and the router over them.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use microblog_core::clock::Clock;
use microblog_core::id::IdGenerator;
use microblog_core::log::{LogEvent, Logger, attr};
use microblog_core::model::Like;
use microblog_core::queue::Consumer;
use microblog_logging::{AsyncLogger, LOG_TARGET};
use microblog_queue::EventQueue;
use microblog_social::Service;
use microblog_social::application::like_processor::{LIKE_QUEUE_NAME, LikeProcessor};
use microblog_store::Repository;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{AppError, ErrorBody};
use crate::routes;
use crate::state::AppState;

/// The running pieces of one server process.
///
/// Dropping an `Application` drains both queues as well, but
/// [`Application::shutdown`] does it in the order that keeps the like
/// queue's final records.
pub struct Application {
    state: AppState,
    likes: Arc<EventQueue<Like>>,
    logs: Arc<AsyncLogger>,
}

impl Application {
    /// Starts the log queue, the stores and the like queue.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Queue` if a queue worker cannot be spawned.
    pub fn build(
        config: &Config,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self, AppError> {
        let logs = AsyncLogger::start(config.log_queue_capacity, clock)?;
        Self::assemble(config, logs, ids)
    }

    /// Like [`Application::build`], with log records handed to `sink`
    /// instead of the tracing subscriber.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Queue` if a queue worker cannot be spawned.
    pub fn build_with_log_sink(
        config: &Config,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        sink: Arc<dyn Consumer<LogEvent>>,
    ) -> Result<Self, AppError> {
        let logs = AsyncLogger::with_sink(config.log_queue_capacity, clock, sink)?;
        Self::assemble(config, logs, ids)
    }

    fn assemble(
        config: &Config,
        logs: AsyncLogger,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self, AppError> {
        let logs = Arc::new(logs);
        let logger: Arc<dyn Logger> = logs.clone();

        let repo = Repository::in_memory(ids);
        let likes = Arc::new(LikeProcessor::start_queue(
            Arc::clone(&repo.posts),
            config.like_queue_capacity,
            logger.with(vec![attr("component", LIKE_QUEUE_NAME)]),
        )?);

        let service = Service::new(
            Arc::clone(&repo.users),
            Arc::clone(&repo.posts),
            likes.clone(),
            logger.with(vec![attr("component", "service")]),
        );
        let state = AppState::new(Arc::new(service), logger, Arc::clone(&likes));

        Ok(Self { state, likes, logs })
    }

    /// State handed to every request handler.
    #[must_use]
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// The full router with middleware applied.
    #[must_use]
    pub fn router(&self, request_timeout: Duration) -> Router {
        router(self.state(), request_timeout)
    }

    /// Drains and stops the like queue, then the log queue. Blocks until
    /// both workers have exited.
    pub fn shutdown(&self) {
        let logger = &self.state.logger;
        logger.info("shutting down", vec![]);

        self.likes.close();
        logger.info(
            "like queue drained",
            vec![attr("processed", self.likes.processed())],
        );

        self.logs.close();
    }
}

/// Builds the router over `state`: `/health` plus the versioned API.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/users", routes::users::router())
        .nest("/api/v1/posts", routes::posts::router())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(target: LOG_TARGET, panic = detail, "request handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::internal())).into_response()
}
