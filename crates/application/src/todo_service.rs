//! Todo item application service.

use std::sync::Arc;

use common::Clock;
use domain::{Entity, Outcome, TodoItem, TodoItemId, TodoItemRepository};
use tokio::sync::Mutex;

use crate::dto::{CreateTodoItemRequest, RenameTodoItemRequest, TodoItemDto};
use crate::error::ApplicationError;
use crate::events::{EventPublisher, commit};

/// Service for managing todo items.
///
/// Mutations of existing items hold the write lock from load to publish.
pub struct TodoItemService<R: TodoItemRepository> {
    repository: R,
    clock: Arc<dyn Clock>,
    publisher: Arc<dyn EventPublisher>,
    writes: Mutex<()>,
}

impl<R: TodoItemRepository> TodoItemService<R> {
    /// Creates a new todo item service.
    pub fn new(repository: R, clock: Arc<dyn Clock>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            repository,
            clock,
            publisher,
            writes: Mutex::new(()),
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, request: CreateTodoItemRequest) -> Outcome<TodoItemDto> {
        let mut item = TodoItem::create(&request.title, self.clock.as_ref())?;
        self.save(&mut item).await?;

        metrics::counter!("todo_items_created_total").increment(1);
        tracing::info!(todo_item_id = %item.id(), "todo item created");
        Ok(TodoItemDto::from(&item))
    }

    /// Returns every item, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Outcome<Vec<TodoItemDto>> {
        let mut items = self.repository.list().await?;
        items.sort_by_key(TodoItem::created_at);
        Ok(items.iter().map(TodoItemDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: TodoItemId) -> Outcome<TodoItemDto> {
        let item = self.load(id).await?;
        Ok(TodoItemDto::from(&item))
    }

    /// Marks the item as done. Completing a completed item succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn complete(&self, id: TodoItemId) -> Outcome<TodoItemDto> {
        let _write = self.writes.lock().await;
        let mut item = self.load(id).await?;
        item.mark_completed(self.clock.as_ref());
        self.save(&mut item).await?;

        tracing::info!(todo_item_id = %id, "todo item completed");
        Ok(TodoItemDto::from(&item))
    }

    #[tracing::instrument(skip(self))]
    pub async fn rename(
        &self,
        id: TodoItemId,
        request: RenameTodoItemRequest,
    ) -> Outcome<TodoItemDto> {
        let _write = self.writes.lock().await;
        let mut item = self.load(id).await?;
        item.rename(&request.title, self.clock.as_ref())?;
        self.save(&mut item).await?;

        tracing::info!(todo_item_id = %id, "todo item renamed");
        Ok(TodoItemDto::from(&item))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: TodoItemId) -> Outcome {
        let _write = self.writes.lock().await;
        if !self.repository.remove(id).await? {
            return Err(ApplicationError::TodoItemNotFound(id.to_string()).into());
        }

        tracing::info!(todo_item_id = %id, "todo item deleted");
        Ok(())
    }

    async fn load(&self, id: TodoItemId) -> Outcome<TodoItem> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::TodoItemNotFound(id.to_string()).into())
    }

    async fn save(&self, item: &mut TodoItem) -> Outcome {
        commit(&self.repository, self.publisher.as_ref(), item).await
    }
}
