//! User aggregate implementation.

use chrono::{DateTime, Utc};
use common::Clock;
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateRoot, DomainEvents, SnapshotCapable};
use crate::entity::Entity;
use crate::outcome::Outcome;

use super::{Email, UserError, UserEvent, UserId};

/// Maximum length of a full name, in characters.
pub const MAX_FULL_NAME_LENGTH: usize = 100;

/// User aggregate root.
///
/// A user is created active, can change email and name in any state and
/// toggles between active and inactive through guarded transitions. Deleting
/// a user is a repository concern; the aggregate has no say in it.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    full_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    events: DomainEvents<UserEvent>,
}

crate::entity_identity!(User);

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

impl AggregateRoot for User {
    type Event = UserEvent;

    fn aggregate_type() -> &'static str {
        "User"
    }

    fn events(&self) -> &DomainEvents<UserEvent> {
        &self.events
    }

    fn events_mut(&mut self) -> &mut DomainEvents<UserEvent> {
        &mut self.events
    }
}

/// Persisted state of a [`User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: UserId,
    pub email: Email,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl SnapshotCapable for User {
    type Snapshot = UserSnapshot;

    fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        }
    }

    fn restore(snapshot: UserSnapshot) -> Self {
        Self {
            id: snapshot.id,
            email: snapshot.email,
            full_name: snapshot.full_name,
            is_active: snapshot.is_active,
            created_at: snapshot.created_at,
            last_login_at: snapshot.last_login_at,
            events: DomainEvents::default(),
        }
    }
}

// Query methods
impl User {
    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the user last logged in, if ever.
    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }
}

// Factory and mutators
impl User {
    /// Registers a new, active user.
    ///
    /// The full name is checked before the email, and an email failure is
    /// returned exactly as [`Email::create`] reported it.
    pub fn create(email: &str, full_name: &str, clock: &dyn Clock) -> Outcome<Self> {
        let full_name = validate_full_name(full_name)?;
        let email = Email::create(email)?;

        let mut user = Self {
            id: UserId::new(),
            email,
            full_name,
            is_active: true,
            created_at: clock.utc(),
            last_login_at: None,
            events: DomainEvents::default(),
        };

        let event = UserEvent::user_created(user.id, user.email.as_str(), user.full_name.as_str());
        user.events.record(event, clock);

        Ok(user)
    }

    /// Switches to a different email address.
    ///
    /// Asking for the address already on file is rejected rather than
    /// silently accepted.
    pub fn change_email(&mut self, new_email: &str, clock: &dyn Clock) -> Outcome {
        let new_email = Email::create(new_email)?;

        if self.email == new_email {
            return Err(UserError::EmailSameAsOld.into());
        }

        let old_email = std::mem::replace(&mut self.email, new_email);
        let event = UserEvent::email_changed(self.id, old_email, self.email.as_str());
        self.events.record(event, clock);

        Ok(())
    }

    /// Replaces the full name. Records no event.
    pub fn update_full_name(&mut self, new_full_name: &str) -> Outcome {
        self.full_name = validate_full_name(new_full_name)?;
        Ok(())
    }

    /// Deactivates an active user.
    ///
    /// An inactive user reports a conflict even when `reason` is blank.
    pub fn deactivate(&mut self, reason: &str, clock: &dyn Clock) -> Outcome {
        if !self.is_active {
            return Err(UserError::AlreadyDeactivated.into());
        }

        if reason.trim().is_empty() {
            return Err(UserError::DeactivationReasonRequired.into());
        }

        self.is_active = false;
        self.events.record(UserEvent::deactivated(self.id, reason), clock);

        Ok(())
    }

    /// Reactivates an inactive user.
    pub fn activate(&mut self, clock: &dyn Clock) -> Outcome {
        if self.is_active {
            return Err(UserError::AlreadyActive.into());
        }

        self.is_active = true;
        self.events.record(UserEvent::activated(self.id), clock);

        Ok(())
    }

    /// Stamps the last login time. Bookkeeping only: no checks, no event.
    pub fn record_login(&mut self, clock: &dyn Clock) {
        self.last_login_at = Some(clock.utc());
    }
}

/// Checks a raw full name and returns it trimmed.
fn validate_full_name(raw: &str) -> Outcome<String> {
    if raw.trim().is_empty() {
        return Err(UserError::FullNameEmpty.into());
    }

    if raw.chars().count() > MAX_FULL_NAME_LENGTH {
        return Err(UserError::FullNameTooLong.into());
    }

    Ok(raw.trim().to_string())
}
