//! User domain events.

use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::UserId;

/// Events recorded by the user aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UserEvent {
    /// User was registered.
    UserCreated(UserCreatedData),

    /// User switched to a different email address.
    UserEmailChanged(UserEmailChangedData),

    /// User was deactivated.
    UserDeactivated(UserDeactivatedData),

    /// User was reactivated.
    UserActivated(UserActivatedData),
}

impl DomainEvent for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::UserCreated(_) => "UserCreated",
            UserEvent::UserEmailChanged(_) => "UserEmailChanged",
            UserEvent::UserDeactivated(_) => "UserDeactivated",
            UserEvent::UserActivated(_) => "UserActivated",
        }
    }
}

/// Data for UserCreated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreatedData {
    pub user_id: UserId,
    pub email: String,
    pub full_name: String,
}

/// Data for UserEmailChanged event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmailChangedData {
    pub user_id: UserId,

    /// Address before the change.
    pub old_email: String,

    /// Address after the change.
    pub new_email: String,
}

/// Data for UserDeactivated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDeactivatedData {
    pub user_id: UserId,

    /// Why the user was deactivated, as supplied by the caller.
    pub reason: String,
}

/// Data for UserActivated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivatedData {
    pub user_id: UserId,
}

// Convenience constructors for events
impl UserEvent {
    pub fn user_created(
        user_id: UserId,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        UserEvent::UserCreated(UserCreatedData {
            user_id,
            email: email.into(),
            full_name: full_name.into(),
        })
    }

    pub fn email_changed(
        user_id: UserId,
        old_email: impl Into<String>,
        new_email: impl Into<String>,
    ) -> Self {
        UserEvent::UserEmailChanged(UserEmailChangedData {
            user_id,
            old_email: old_email.into(),
            new_email: new_email.into(),
        })
    }

    pub fn deactivated(user_id: UserId, reason: impl Into<String>) -> Self {
        UserEvent::UserDeactivated(UserDeactivatedData {
            user_id,
            reason: reason.into(),
        })
    }

    pub fn activated(user_id: UserId) -> Self {
        UserEvent::UserActivated(UserActivatedData { user_id })
    }
}
