//! Todo item aggregate and related types.

mod aggregate;
mod events;

pub use aggregate::{TodoItem, TodoItemSnapshot};
pub use events::{TodoItemCompletedData, TodoItemCreatedData, TodoItemEvent, TodoItemRenamedData};

use thiserror::Error;

use crate::outcome::{Error as OutcomeError, ErrorKind};

common::uuid_id! {
    /// Unique identifier for a todo item.
    TodoItemId
}

/// Business rule violations raised by the todo item aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TodoItemError {
    /// Title is blank.
    #[error("Title cannot be empty")]
    TitleEmpty,
}

impl TodoItemError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            TodoItemError::TitleEmpty => "TodoItem.Title.Empty",
        }
    }
}

impl From<TodoItemError> for OutcomeError {
    fn from(e: TodoItemError) -> Self {
        OutcomeError::new(e.code(), e.to_string(), ErrorKind::Validation)
    }
}
