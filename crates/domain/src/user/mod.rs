//! User aggregate and related types.

mod aggregate;
mod email;
mod events;

pub use aggregate::{MAX_FULL_NAME_LENGTH, User, UserSnapshot};
pub use email::{Email, EmailError, MAX_EMAIL_LENGTH};
pub use events::{
    UserActivatedData, UserCreatedData, UserDeactivatedData, UserEmailChangedData, UserEvent,
};

use thiserror::Error;

use crate::outcome::{Error as OutcomeError, ErrorKind};

common::uuid_id! {
    /// Unique identifier for a user.
    UserId
}

/// Business rule violations raised by the user aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserError {
    /// Full name is blank.
    #[error("Full name cannot be empty")]
    FullNameEmpty,

    /// Full name is longer than [`MAX_FULL_NAME_LENGTH`].
    #[error("Full name cannot exceed 100 characters")]
    FullNameTooLong,

    /// The requested email is the one already on file.
    #[error("New email is the same as the current email")]
    EmailSameAsOld,

    /// Deactivation requested for an inactive user.
    #[error("User is already deactivated")]
    AlreadyDeactivated,

    /// Deactivation requested without a reason.
    #[error("Deactivation reason is required")]
    DeactivationReasonRequired,

    /// Activation requested for an active user.
    #[error("User is already active")]
    AlreadyActive,
}

impl UserError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            UserError::FullNameEmpty => "User.FullName.Empty",
            UserError::FullNameTooLong => "User.FullName.TooLong",
            UserError::EmailSameAsOld => "User.Email.SameAsOld",
            UserError::AlreadyDeactivated => "User.AlreadyDeactivated",
            UserError::DeactivationReasonRequired => "User.Deactivate.ReasonRequired",
            UserError::AlreadyActive => "User.AlreadyActive",
        }
    }

    /// Returns how the violation is classified.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::AlreadyDeactivated | UserError::AlreadyActive => ErrorKind::Conflict,
            UserError::FullNameEmpty
            | UserError::FullNameTooLong
            | UserError::EmailSameAsOld
            | UserError::DeactivationReasonRequired => ErrorKind::Validation,
        }
    }
}

impl From<UserError> for OutcomeError {
    fn from(e: UserError) -> Self {
        OutcomeError::new(e.code(), e.to_string(), e.kind())
    }
}
