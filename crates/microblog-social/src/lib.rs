//! Microblog: users, posts and likes.
//!
//! Responsible for the domain preconditions checked before a store is
//! touched or a like is queued, and for applying queued likes.

pub mod application;
mod service;

pub use service::Service;
