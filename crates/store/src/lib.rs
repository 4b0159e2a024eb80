//! Persistence adapters for the domain repository ports.
//!
//! Aggregates are stored as JSON snapshots keyed by identity. Pending
//! domain events are never persisted; draining them is the caller's job.

pub mod memory;

pub use memory::{InMemoryRepository, InMemoryTodoItemRepository, InMemoryUserRepository};
