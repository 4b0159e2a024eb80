use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::error::Result;
use domain::{
    Email, Repository, SnapshotCapable, TodoItem, TodoItemRepository, User, UserRepository,
};
use tokio::sync::RwLock;

/// In-memory repository keeping one JSON snapshot per aggregate.
///
/// Clones share the same storage. The lock serializes writers; secondary
/// lookups are linear scans over every stored snapshot.
pub struct InMemoryRepository<A: SnapshotCapable> {
    snapshots: Arc<RwLock<HashMap<A::Id, serde_json::Value>>>,
}

/// User repository backed by memory.
pub type InMemoryUserRepository = InMemoryRepository<User>;

/// Todo item repository backed by memory.
pub type InMemoryTodoItemRepository = InMemoryRepository<TodoItem>;

impl<A: SnapshotCapable> InMemoryRepository<A> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of stored aggregates.
    pub async fn count(&self) -> usize {
        self.snapshots.read().await.len()
    }

    /// Removes every stored aggregate.
    pub async fn clear(&self) {
        self.snapshots.write().await.clear();
    }

    /// Loads every stored aggregate matching `predicate`.
    async fn scan<F>(&self, predicate: F) -> Result<Vec<A>>
    where
        F: Fn(&A) -> bool + Send,
    {
        let store = self.snapshots.read().await;
        let mut found = Vec::new();
        for value in store.values() {
            let aggregate = decode::<A>(value)?;
            if predicate(&aggregate) {
                found.push(aggregate);
            }
        }
        Ok(found)
    }
}

impl<A: SnapshotCapable> Default for InMemoryRepository<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: SnapshotCapable> Clone for InMemoryRepository<A> {
    fn clone(&self) -> Self {
        Self {
            snapshots: Arc::clone(&self.snapshots),
        }
    }
}

fn decode<A: SnapshotCapable>(value: &serde_json::Value) -> Result<A> {
    let snapshot = serde_json::from_value(value.clone())?;
    Ok(A::restore(snapshot))
}

#[async_trait]
impl<A> Repository<A> for InMemoryRepository<A>
where
    A: SnapshotCapable + 'static,
{
    async fn get_by_id(&self, id: A::Id) -> Result<Option<A>> {
        let store = self.snapshots.read().await;
        let aggregate = store.get(&id).map(decode::<A>).transpose()?;
        tracing::debug!(
            aggregate_type = A::aggregate_type(),
            %id,
            found = aggregate.is_some(),
            "loaded aggregate"
        );
        Ok(aggregate)
    }

    async fn list(&self) -> Result<Vec<A>> {
        self.scan(|_| true).await
    }

    async fn save(&self, aggregate: &A) -> Result<()> {
        let id = aggregate.id();
        let value = serde_json::to_value(aggregate.snapshot())?;
        self.snapshots.write().await.insert(id, value);
        tracing::debug!(aggregate_type = A::aggregate_type(), %id, "saved aggregate");
        Ok(())
    }

    async fn remove(&self, id: A::Id) -> Result<bool> {
        let removed = self.snapshots.write().await.remove(&id).is_some();
        tracing::debug!(aggregate_type = A::aggregate_type(), %id, removed, "removed aggregate");
        Ok(removed)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn get_by_email(&self, email: &Email) -> Result<Option<User>> {
        let mut matches = self.scan(|user| user.email() == email).await?;
        Ok(matches.pop())
    }

    async fn get_active_users(&self) -> Result<Vec<User>> {
        let mut users = self.scan(User::is_active).await?;
        users.sort_by_key(User::created_at);
        Ok(users)
    }
}

impl TodoItemRepository for InMemoryRepository<TodoItem> {}
