//! Predictable identifiers for assertions.

use std::sync::atomic::{AtomicU64, Ordering};

use microblog_core::id::IdGenerator;
use uuid::Uuid;

/// Yields `00000000-0000-0000-0000-000000000001`, `...0002`, and so on.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first id ends in `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id this generator returns on its `n`th call (1-based).
    #[must_use]
    pub fn nth(n: u64) -> Uuid {
        Uuid::from_u128(u128::from(n))
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Uuid {
        Self::nth(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
