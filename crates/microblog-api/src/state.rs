//! Shared application state.

use std::sync::Arc;

use microblog_core::log::Logger;
use microblog_core::model::Like;
use microblog_queue::EventQueue;
use microblog_social::Service;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// User, post and like operations.
    pub service: Arc<Service>,
    /// Request-level logger.
    pub logger: Arc<dyn Logger>,
    /// The like queue, exposed for health reporting.
    pub likes: Arc<EventQueue<Like>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        service: Arc<Service>,
        logger: Arc<dyn Logger>,
        likes: Arc<EventQueue<Like>>,
    ) -> Self {
        Self {
            service,
            logger,
            likes,
        }
    }
}
