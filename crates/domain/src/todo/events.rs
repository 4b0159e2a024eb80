//! Todo item domain events.

use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::TodoItemId;

/// Events recorded by the todo item aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum TodoItemEvent {
    /// Item was created.
    TodoItemCreated(TodoItemCreatedData),

    /// Item was marked as done.
    TodoItemCompleted(TodoItemCompletedData),

    /// Item title was changed.
    TodoItemRenamed(TodoItemRenamedData),
}

impl DomainEvent for TodoItemEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TodoItemEvent::TodoItemCreated(_) => "TodoItemCreated",
            TodoItemEvent::TodoItemCompleted(_) => "TodoItemCompleted",
            TodoItemEvent::TodoItemRenamed(_) => "TodoItemRenamed",
        }
    }
}

/// Data for TodoItemCreated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItemCreatedData {
    pub todo_item_id: TodoItemId,
    pub title: String,
}

/// Data for TodoItemCompleted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItemCompletedData {
    pub todo_item_id: TodoItemId,
}

/// Data for TodoItemRenamed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItemRenamedData {
    pub todo_item_id: TodoItemId,
    pub old_title: String,
    pub new_title: String,
}

impl TodoItemEvent {
    pub fn created(todo_item_id: TodoItemId, title: impl Into<String>) -> Self {
        TodoItemEvent::TodoItemCreated(TodoItemCreatedData {
            todo_item_id,
            title: title.into(),
        })
    }

    pub fn completed(todo_item_id: TodoItemId) -> Self {
        TodoItemEvent::TodoItemCompleted(TodoItemCompletedData { todo_item_id })
    }

    pub fn renamed(
        todo_item_id: TodoItemId,
        old_title: impl Into<String>,
        new_title: impl Into<String>,
    ) -> Self {
        TodoItemEvent::TodoItemRenamed(TodoItemRenamedData {
            todo_item_id,
            old_title: old_title.into(),
            new_title: new_title.into(),
        })
    }
}
