//! Microblog: in-memory stores.
//!
//! Each store owns one collection behind a single readers-writer lock.
//! Mutations take the write guard, reads take the read guard, and no
//! operation ever holds locks on two stores.

mod post_store;
mod repository;
mod user_store;

pub use post_store::InMemoryPostStore;
pub use repository::Repository;
pub use user_store::InMemoryUserStore;
