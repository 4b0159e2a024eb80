//! Failures raised by the application services themselves.

use domain::{Error, ErrorKind};
use thiserror::Error;

/// Failures that only make sense with a view over more than one aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    #[error("User with ID {0} was not found")]
    UserNotFound(String),

    #[error("User with email {0} was not found")]
    UserEmailNotFound(String),

    /// Another user already owns the address.
    #[error("A user with email {0} already exists")]
    EmailAlreadyExists(String),

    #[error("Todo item with ID {0} was not found")]
    TodoItemNotFound(String),

    /// Recorded events could not be turned into their published form.
    #[error("Domain event could not be serialized: {0}")]
    EventSerialization(String),
}

impl ApplicationError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApplicationError::UserNotFound(_) | ApplicationError::UserEmailNotFound(_) => {
                "User.NotFound"
            }
            ApplicationError::EmailAlreadyExists(_) => "User.Email.AlreadyExists",
            ApplicationError::TodoItemNotFound(_) => "TodoItem.NotFound",
            ApplicationError::EventSerialization(_) => "Event.Serialization",
        }
    }

    /// Returns how the failure is classified.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::UserNotFound(_)
            | ApplicationError::UserEmailNotFound(_)
            | ApplicationError::TodoItemNotFound(_) => ErrorKind::NotFound,
            ApplicationError::EmailAlreadyExists(_) => ErrorKind::Conflict,
            ApplicationError::EventSerialization(_) => ErrorKind::Failure,
        }
    }
}

impl From<ApplicationError> for Error {
    fn from(e: ApplicationError) -> Self {
        Error::new(e.code(), e.to_string(), e.kind())
    }
}
