//! Microblog Core: shared domain abstractions.
//!
//! This crate defines the model, the error taxonomy and the capability
//! traits (repositories, queues, logging, clock, ids) that every other
//! crate depends on. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod id;
pub mod log;
pub mod model;
pub mod queue;
pub mod repository;
