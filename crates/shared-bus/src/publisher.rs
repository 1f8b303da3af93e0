//! # Event Publisher
//!
//! The bus itself: a `tokio::sync::broadcast` channel of [`PoolEvent`]s.
//! Filtering happens on the receiving side.

use crate::events::{EventFilter, PoolEvent};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use tokio::sync::broadcast;
use tracing::debug;

/// Publishing side of the bus, as seen by the ledgers.
///
/// Never blocks and never fails: callers publish after their exclusive
/// section has committed.
pub trait EventPublisher: Send + Sync {
    /// Returns the number of receivers the event reached.
    fn publish(&self, event: PoolEvent) -> usize;
}

/// In-process event bus.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<PoolEvent>,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus whose receivers lag after `capacity` unread events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "[bus] Subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        debug!(topics = ?filter.topics, "[bus] Event stream created");
        EventStream::new(self.sender.subscribe(), filter)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: PoolEvent) -> usize {
        let topic = event.topic();
        let source = event.source_component();
        // A send error only means nobody is listening.
        let receivers = self.sender.send(event).unwrap_or(0);
        debug!(topic = ?topic, source, receivers, "[bus] Event published");
        receivers
    }
}
