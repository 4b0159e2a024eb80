//! Application layer.
//!
//! Services load aggregates through the repository ports, invoke their
//! business operations, persist the result and then publish the events the
//! aggregate recorded. Failures are returned as [`domain::Outcome`] values and
//! are never persisted.

pub mod dto;
pub mod error;
pub mod events;
pub mod todo_service;
pub mod user_service;

pub use dto::{
    CreateTodoItemRequest, CreateUserRequest, DeactivateUserRequest, RenameTodoItemRequest,
    TodoItemDto, UpdateUserRequest, UserDto,
};
pub use error::ApplicationError;
pub use events::{EventPublisher, PublishedEvent, RecordingEventPublisher, TracingEventPublisher};
pub use todo_service::TodoItemService;
pub use user_service::UserService;
