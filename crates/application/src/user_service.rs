//! User application service.

use std::sync::Arc;

use common::Clock;
use domain::{Email, Entity, Outcome, User, UserId, UserRepository};
use tokio::sync::Mutex;

use crate::dto::{CreateUserRequest, DeactivateUserRequest, UpdateUserRequest, UserDto};
use crate::error::ApplicationError;
use crate::events::{EventPublisher, commit};

/// Service for managing users.
///
/// Enforces the rules that need a view over every user (email uniqueness)
/// and delegates everything else to the [`User`] aggregate.
///
/// Mutations run one at a time: the write lock is held from the first read
/// to the last publish, so the email uniqueness check and the save it guards
/// cannot interleave with another writer.
pub struct UserService<R: UserRepository> {
    repository: R,
    clock: Arc<dyn Clock>,
    publisher: Arc<dyn EventPublisher>,
    writes: Mutex<()>,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
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

    /// Registers a new user with a unique email address.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, request: CreateUserRequest) -> Outcome<UserDto> {
        let email = Email::create(&request.email)?;

        let _write = self.writes.lock().await;
        self.ensure_email_available(&email).await?;

        let mut user = User::create(email.as_str(), &request.full_name, self.clock.as_ref())?;
        self.save(&mut user).await?;

        metrics::counter!("users_created_total").increment(1);
        tracing::info!(user_id = %user.id(), "user created");
        Ok(UserDto::from(&user))
    }

    /// Returns every user, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Outcome<Vec<UserDto>> {
        let mut users = self.repository.list().await?;
        users.sort_by_key(User::created_at);
        Ok(users.iter().map(UserDto::from).collect())
    }

    /// Returns active users, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn active_users(&self) -> Outcome<Vec<UserDto>> {
        let users = self.repository.get_active_users().await?;
        Ok(users.iter().map(UserDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: UserId) -> Outcome<UserDto> {
        let user = self.load(id).await?;
        Ok(UserDto::from(&user))
    }

    /// Looks a user up by address. A malformed address is a validation
    /// failure, not a miss.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Outcome<UserDto> {
        let email = Email::create(email)?;
        let user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or_else(|| ApplicationError::UserEmailNotFound(email.to_string()))?;
        Ok(UserDto::from(&user))
    }

    /// Applies a partial update: email first, then full name.
    ///
    /// Nothing is persisted unless every requested change succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: UserId, request: UpdateUserRequest) -> Outcome<UserDto> {
        let _write = self.writes.lock().await;
        let mut user = self.load(id).await?;

        if let Some(raw) = non_blank(request.email.as_deref()) {
            let email = Email::create(raw)?;
            if &email != user.email() {
                self.ensure_email_available(&email).await?;
            }
            user.change_email(email.as_str(), self.clock.as_ref())?;
        }

        if let Some(full_name) = non_blank(request.full_name.as_deref()) {
            user.update_full_name(full_name)?;
        }

        self.save(&mut user).await?;

        tracing::info!(user_id = %id, "user updated");
        Ok(UserDto::from(&user))
    }

    #[tracing::instrument(skip(self))]
    pub async fn deactivate(&self, id: UserId, request: DeactivateUserRequest) -> Outcome {
        let _write = self.writes.lock().await;
        let mut user = self.load(id).await?;
        user.deactivate(&request.reason, self.clock.as_ref())?;
        self.save(&mut user).await?;

        tracing::info!(user_id = %id, "user deactivated");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn activate(&self, id: UserId) -> Outcome {
        let _write = self.writes.lock().await;
        let mut user = self.load(id).await?;
        user.activate(self.clock.as_ref())?;
        self.save(&mut user).await?;

        tracing::info!(user_id = %id, "user activated");
        Ok(())
    }

    /// Stamps the user's last login time.
    #[tracing::instrument(skip(self))]
    pub async fn record_login(&self, id: UserId) -> Outcome {
        let _write = self.writes.lock().await;
        let mut user = self.load(id).await?;
        user.record_login(self.clock.as_ref());
        self.save(&mut user).await
    }

    /// Removes a user from the store.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Outcome {
        let _write = self.writes.lock().await;
        if !self.repository.remove(id).await? {
            return Err(ApplicationError::UserNotFound(id.to_string()).into());
        }

        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn load(&self, id: UserId) -> Outcome<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::UserNotFound(id.to_string()).into())
    }

    async fn save(&self, user: &mut User) -> Outcome {
        commit(&self.repository, self.publisher.as_ref(), user).await
    }

    async fn ensure_email_available(&self, email: &Email) -> Outcome {
        if self.repository.exists_with_email(email).await? {
            return Err(ApplicationError::EmailAlreadyExists(email.to_string()).into());
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
