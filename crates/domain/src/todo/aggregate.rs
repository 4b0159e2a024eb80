//! Todo item aggregate implementation.

use chrono::{DateTime, Utc};
use common::Clock;
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateRoot, DomainEvents, SnapshotCapable};
use crate::entity::Entity;
use crate::outcome::Outcome;

use super::{TodoItemError, TodoItemEvent, TodoItemId};

/// Todo item aggregate root.
///
/// The title can be changed at any time; completion only goes one way.
#[derive(Debug, Clone)]
pub struct TodoItem {
    id: TodoItemId,
    title: String,
    is_completed: bool,
    created_at: DateTime<Utc>,
    events: DomainEvents<TodoItemEvent>,
}

crate::entity_identity!(TodoItem);

impl Entity for TodoItem {
    type Id = TodoItemId;

    fn id(&self) -> TodoItemId {
        self.id
    }
}

impl AggregateRoot for TodoItem {
    type Event = TodoItemEvent;

    fn aggregate_type() -> &'static str {
        "TodoItem"
    }

    fn events(&self) -> &DomainEvents<TodoItemEvent> {
        &self.events
    }

    fn events_mut(&mut self) -> &mut DomainEvents<TodoItemEvent> {
        &mut self.events
    }
}

/// Persisted state of a [`TodoItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItemSnapshot {
    pub id: TodoItemId,
    pub title: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl SnapshotCapable for TodoItem {
    type Snapshot = TodoItemSnapshot;

    fn snapshot(&self) -> TodoItemSnapshot {
        TodoItemSnapshot {
            id: self.id,
            title: self.title.clone(),
            is_completed: self.is_completed,
            created_at: self.created_at,
        }
    }

    fn restore(snapshot: TodoItemSnapshot) -> Self {
        Self {
            id: snapshot.id,
            title: snapshot.title,
            is_completed: snapshot.is_completed,
            created_at: snapshot.created_at,
            events: DomainEvents::default(),
        }
    }
}

impl TodoItem {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Creates an open item with a trimmed title.
    pub fn create(title: &str, clock: &dyn Clock) -> Outcome<Self> {
        let title = validate_title(title)?;

        let mut item = Self {
            id: TodoItemId::new(),
            title,
            is_completed: false,
            created_at: clock.utc(),
            events: DomainEvents::default(),
        };

        let event = TodoItemEvent::created(item.id, item.title.as_str());
        item.events.record(event, clock);

        Ok(item)
    }

    /// Marks the item as done. Completing a completed item does nothing.
    pub fn mark_completed(&mut self, clock: &dyn Clock) {
        if self.is_completed {
            return;
        }

        self.is_completed = true;
        self.events.record(TodoItemEvent::completed(self.id), clock);
    }

    /// Replaces the title with a trimmed one.
    pub fn rename(&mut self, new_title: &str, clock: &dyn Clock) -> Outcome {
        let new_title = validate_title(new_title)?;

        let old_title = std::mem::replace(&mut self.title, new_title);
        let event = TodoItemEvent::renamed(self.id, old_title, self.title.as_str());
        self.events.record(event, clock);

        Ok(())
    }
}

fn validate_title(raw: &str) -> Outcome<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TodoItemError::TitleEmpty.into());
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{ErrorKind, OutcomeExt};
    use chrono::TimeZone;
    use common::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap())
    }

    #[test]
    fn test_create_item() {
        let clock = clock();
        let item = TodoItem::create("  Buy milk ", &clock).unwrap();

        assert_eq!(item.title(), "Buy milk");
        assert!(!item.is_completed());
        assert_eq!(item.created_at(), clock.utc());
        assert_eq!(item.domain_events().len(), 1);
        assert_eq!(
            item.domain_events()[0].event(),
            &TodoItemEvent::created(item.id(), "Buy milk")
        );
    }

    #[test]
    fn test_create_with_blank_title_fails() {
        let error = TodoItem::create(" \t ", &clock()).into_error();
        assert_eq!(error.code(), "TodoItem.Title.Empty");
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_mark_completed_is_idempotent() {
        let clock = clock();
        let mut item = TodoItem::create("Buy milk", &clock).unwrap();

        item.mark_completed(&clock);
        item.mark_completed(&clock);

        assert!(item.is_completed());
        let completed = item
            .domain_events()
            .iter()
            .filter(|e| e.event_type() == "TodoItemCompleted")
            .count();
        assert_eq!(completed, 1);
    }

    #[test]
    fn test_rename() {
        let clock = clock();
        let mut item = TodoItem::create("Buy milk", &clock).unwrap();
        item.clear_domain_events();

        item.rename(" Buy oat milk ", &clock).unwrap();

        assert_eq!(item.title(), "Buy oat milk");
        assert_eq!(
            item.domain_events()[0].event(),
            &TodoItemEvent::renamed(item.id(), "Buy milk", "Buy oat milk")
        );
    }

    #[test]
    fn test_rename_completed_item_is_allowed() {
        let clock = clock();
        let mut item = TodoItem::create("Buy milk", &clock).unwrap();
        item.mark_completed(&clock);

        assert!(item.rename("Bought milk", &clock).is_ok());
        assert!(item.is_completed());
    }

    #[test]
    fn test_rename_to_blank_fails_without_side_effects() {
        let clock = clock();
        let mut item = TodoItem::create("Buy milk", &clock).unwrap();

        let error = item.rename("", &clock).into_error();

        assert_eq!(error.code(), "TodoItem.Title.Empty");
        assert_eq!(item.title(), "Buy milk");
        assert_eq!(item.domain_events().len(), 1);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let clock = clock();
        let mut item = TodoItem::create("Buy milk", &clock).unwrap();
        item.mark_completed(&clock);

        let restored = TodoItem::restore(item.snapshot());

        assert_eq!(restored, item);
        assert_eq!(restored.title(), "Buy milk");
        assert!(restored.is_completed());
        assert!(restored.domain_events().is_empty());
    }
}
