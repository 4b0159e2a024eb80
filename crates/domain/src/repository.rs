//! Repository ports.
//!
//! The kernel owns these traits; the persistence layer implements them.

use async_trait::async_trait;

use crate::aggregate::SnapshotCapable;
use crate::entity::Entity;
use crate::error::Result;
use crate::todo::TodoItem;
use crate::user::{Email, User};

/// Identity-keyed storage for one aggregate type.
///
/// All implementations must be thread-safe (Send + Sync). Writes to the same
/// identity are serialized by the implementation.
#[async_trait]
pub trait Repository<A>: Send + Sync
where
    A: SnapshotCapable + 'static,
{
    /// Loads an aggregate by identity.
    ///
    /// Returns None if nothing is stored under `id`.
    async fn get_by_id(&self, id: <A as Entity>::Id) -> Result<Option<A>>;

    /// Loads every stored aggregate. Order is unspecified.
    async fn list(&self) -> Result<Vec<A>>;

    /// Stores the aggregate, replacing any previous state with the same identity.
    ///
    /// Pending domain events are not persisted.
    async fn save(&self, aggregate: &A) -> Result<()>;

    /// Removes an aggregate.
    ///
    /// Returns false if nothing was stored under `id`.
    async fn remove(&self, id: <A as Entity>::Id) -> Result<bool>;
}

/// User storage with the lookups the application needs.
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Finds the user owning `email`.
    async fn get_by_email(&self, email: &Email) -> Result<Option<User>>;

    /// Checks whether any user owns `email`.
    async fn exists_with_email(&self, email: &Email) -> Result<bool> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    /// Returns active users, oldest first.
    async fn get_active_users(&self) -> Result<Vec<User>>;
}

/// Todo item storage.
pub trait TodoItemRepository: Repository<TodoItem> {}
