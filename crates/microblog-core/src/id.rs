//! Identifier generation.
//!
//! Stores mint identifiers through this trait so tests can inject a
//! predictable sequence.

use uuid::Uuid;

/// Source of unique identifiers.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier, never returned before by this generator.
    fn next_id(&self) -> Uuid;
}

/// Production generator backed by time-ordered UUID v7 values.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn next_id(&self) -> Uuid {
        Uuid::now_v7()
    }
}
