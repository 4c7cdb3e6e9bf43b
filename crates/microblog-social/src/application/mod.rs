//! Application services and queue consumers.

pub mod like_processor;
pub mod post_service;
pub mod user_service;
