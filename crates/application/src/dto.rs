//! Request and response shapes exchanged with the outer layers.

use chrono::{DateTime, Utc};
use domain::{Entity, TodoItem, TodoItemId, User, UserId};
use serde::{Deserialize, Serialize};

/// Read model of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().to_string(),
            full_name: user.full_name().to_string(),
            is_active: user.is_active(),
            created_at: user.created_at(),
            last_login_at: user.last_login_at(),
        }
    }
}

/// Read model of a todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItemDto {
    pub id: TodoItemId,
    pub title: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&TodoItem> for TodoItemDto {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id(),
            title: item.title().to_string(),
            is_completed: item.is_completed(),
            created_at: item.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub full_name: String,
}

/// Partial update. Absent or blank fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivateUserRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoItemRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameTodoItemRequest {
    pub title: String,
}
