//! Microblog HTTP API.
//!
//! [`app::Application`] owns the long-lived pieces of the process (the log
//! queue, the like queue and the service layer) and hands out the axum
//! router that serves them.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
