//! Aggregate root, domain event and snapshot traits.

use chrono::{DateTime, Utc};
use common::{Clock, EventId};
use serde::{Serialize, de::DeserializeOwned};

use crate::entity::Entity;

/// Trait for domain event payloads.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;
}

/// A recorded domain event: the payload plus its identity and occurrence time.
///
/// Both the id and the timestamp are fixed when the event is recorded and
/// never recomputed.
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope<E> {
    event_id: EventId,
    occurred_at: DateTime<Utc>,
    event: E,
}

impl<E> EventEnvelope<E> {
    fn new(event: E, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: EventId::new(),
            occurred_at,
            event,
        }
    }

    /// Returns the globally unique event id.
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Returns when the event occurred.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the event payload.
    pub fn event(&self) -> &E {
        &self.event
    }

    /// Consumes the envelope, returning the payload.
    pub fn into_event(self) -> E {
        self.event
    }
}

impl<E: DomainEvent> EventEnvelope<E> {
    /// Returns the payload's event type name.
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}

/// Insertion-ordered list of events an aggregate has recorded since the last
/// clear.
///
/// Only the kernel's own aggregates can append. Everyone else can read the
/// list, clear it or drain it after consuming the events.
#[derive(Debug, Clone)]
pub struct DomainEvents<E> {
    pending: Vec<EventEnvelope<E>>,
}

impl<E> Default for DomainEvents<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E> DomainEvents<E> {
    pub(crate) fn record(&mut self, event: E, clock: &dyn Clock) {
        self.pending.push(EventEnvelope::new(event, clock.utc()));
    }

    /// Returns the recorded events, oldest first.
    pub fn as_slice(&self) -> &[EventEnvelope<E>] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Forgets every recorded event.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Removes and returns every recorded event, oldest first.
    pub fn drain(&mut self) -> Vec<EventEnvelope<E>> {
        std::mem::take(&mut self.pending)
    }
}

/// Trait for aggregate roots.
///
/// An aggregate is a cluster of domain objects that can be treated as a single unit.
/// The aggregate root is the only entry point for mutating it, enforces its
/// invariants on every mutation and records a domain event for each
/// business transition.
///
/// Events are drained by the orchestrator after the aggregate has been
/// persisted; the aggregate never delivers them itself.
pub trait AggregateRoot: Entity + Send + Sync {
    /// The type of events this aggregate records.
    type Event: DomainEvent;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Returns the recorded event list.
    fn events(&self) -> &DomainEvents<Self::Event>;

    /// Returns the recorded event list for clearing or draining.
    fn events_mut(&mut self) -> &mut DomainEvents<Self::Event>;

    /// Returns the events recorded since the last clear, oldest first.
    fn domain_events(&self) -> &[EventEnvelope<Self::Event>] {
        self.events().as_slice()
    }

    /// Forgets the recorded events once they have been consumed.
    fn clear_domain_events(&mut self) {
        self.events_mut().clear();
    }

    /// Removes and returns the recorded events, oldest first.
    fn take_domain_events(&mut self) -> Vec<EventEnvelope<Self::Event>> {
        self.events_mut().drain()
    }
}

/// Trait for aggregates that can be persisted as a snapshot of their state.
///
/// `restore` is the reconstruction path reserved for the persistence
/// boundary. It performs no business validation and the restored aggregate
/// carries no pending events.
pub trait SnapshotCapable: AggregateRoot + Sized {
    /// Serializable state of the aggregate.
    type Snapshot: Serialize + DeserializeOwned + Send + Sync;

    /// Captures the current state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Rebuilds an aggregate from a previously captured state.
    fn restore(snapshot: Self::Snapshot) -> Self;
}
