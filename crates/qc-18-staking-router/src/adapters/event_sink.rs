//! Event Sink Adapters
//!
//! Implements the `EventSink` port for registry notifications.

use crate::events::RegistryEvent;
use crate::ports::outbound::{EventSink, SinkError};
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::info;

/// Default broadcast buffer per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// In-memory event sink for testing
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    events: RwLock<Vec<RegistryEvent>>,
}

impl InMemoryEventSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events, in publish order.
    pub fn get_events(&self) -> Vec<RegistryEvent> {
        self.events.read().clone()
    }

    /// Number of recorded events.
    pub fn event_count(&self) -> usize {
        self.events.read().len()
    }

    /// Forget recorded events.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl EventSink for InMemoryEventSink {
    fn publish(&self, event: RegistryEvent) -> Result<(), SinkError> {
        self.events.write().push(event);
        Ok(())
    }
}

/// Fans events out to any number of subscribers.
///
/// Uses `tokio::sync::broadcast`; slow subscribers lag rather than block
/// the registry.
pub struct BroadcastEventSink {
    sender: broadcast::Sender<RegistryEvent>,
}

impl BroadcastEventSink {
    /// Create with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create with a specific per-subscriber capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for BroadcastEventSink {
    fn publish(&self, event: RegistryEvent) -> Result<(), SinkError> {
        let name = event.name();
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|_| SinkError::NoSubscribers(name))
    }
}

/// Writes every event to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: RegistryEvent) -> Result<(), SinkError> {
        info!(
            module_id = event.module_id().get(),
            event = event.name(),
            "[qc-18] {:?}",
            event
        );
        Ok(())
    }
}
