//! Domain kernel for the user and todo item model.
//!
//! This crate provides the core domain abstractions including:
//! - Outcome/Error channel for expected business rule violations
//! - Entity, ValueObject and AggregateRoot traits
//! - DomainEvent trait and the recorded event envelope
//! - User and TodoItem aggregates, and the Email value object
//! - Repository ports implemented by the persistence layer

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod outcome;
pub mod repository;
pub mod todo;
pub mod user;
pub mod value_object;

pub use aggregate::{AggregateRoot, DomainEvent, DomainEvents, EventEnvelope, SnapshotCapable};
pub use entity::Entity;
pub use error::RepositoryError;
pub use outcome::{Error, ErrorKind, Outcome, OutcomeExt};
pub use repository::{Repository, TodoItemRepository, UserRepository};
pub use todo::{TodoItem, TodoItemError, TodoItemEvent, TodoItemId, TodoItemSnapshot};
pub use user::{Email, EmailError, User, UserError, UserEvent, UserId, UserSnapshot};
pub use value_object::ValueObject;
