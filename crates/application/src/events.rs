//! Post-commit publication of recorded domain events.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::EventId;
use domain::{AggregateRoot, EventEnvelope, Outcome, Repository, SnapshotCapable};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::ApplicationError;

/// A recorded domain event, detached from its aggregate's event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedEvent {
    pub event_id: EventId,
    pub event_type: String,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl PublishedEvent {
    /// Builds the published form of an event recorded by `A`.
    pub fn from_envelope<A: AggregateRoot>(
        aggregate_id: A::Id,
        envelope: &EventEnvelope<A::Event>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_id: envelope.event_id(),
            event_type: envelope.event_type().to_string(),
            aggregate_type: A::aggregate_type().to_string(),
            aggregate_id: aggregate_id.to_string(),
            occurred_at: envelope.occurred_at(),
            payload: serde_json::to_value(envelope.event())?,
        })
    }
}

/// Destination for events once their aggregate has been persisted.
///
/// Delivery is best effort and at most once; there are no subscribers.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: PublishedEvent);
}

/// Publisher that logs each event and counts it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: PublishedEvent) {
        metrics::counter!("domain_events_published_total").increment(1);
        tracing::info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            "domain event published"
        );
    }
}

/// Publisher that keeps every event in memory, for inspection in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventPublisher {
    events: Arc<Mutex<Vec<PublishedEvent>>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events published so far, oldest first.
    pub async fn events(&self) -> Vec<PublishedEvent> {
        self.events.lock().await.clone()
    }

    /// Returns the published event types, oldest first.
    pub async fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .await
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }

    pub async fn clear(&self) {
        self.events.lock().await.clear();
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: PublishedEvent) {
        self.events.lock().await.push(event);
    }
}

/// Persists `aggregate`, then drains and publishes the events it recorded.
///
/// Events are converted before anything is written, so a conversion failure
/// leaves both the store and the aggregate untouched.
pub(crate) async fn commit<A, R>(
    repository: &R,
    publisher: &dyn EventPublisher,
    aggregate: &mut A,
) -> Outcome
where
    A: SnapshotCapable + 'static,
    R: Repository<A> + ?Sized,
{
    let id = aggregate.id();
    let pending = aggregate
        .domain_events()
        .iter()
        .map(|envelope| PublishedEvent::from_envelope::<A>(id, envelope))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApplicationError::EventSerialization(e.to_string()))?;

    repository.save(aggregate).await?;
    aggregate.clear_domain_events();

    for event in pending {
        publisher.publish(event).await;
    }

    Ok(())
}
