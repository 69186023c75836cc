//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use game_core::SessionEvent;

use super::types::NotificationEvent;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Session state changes (ticks, room transitions, terminal outcomes).
    Session,
    /// Transient notification lifecycle.
    Notification,
}

/// Event wrapper that carries the topic and typed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Session(SessionEvent),
    Notification(NotificationEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Session(_) => Topic::Session,
            Event::Notification(_) => Topic::Notification,
        }
    }
}

/// Topic-based event bus.
///
/// Consumers subscribe to specific topics and only receive events they
/// care about. Publishing is best-effort: a topic with no subscribers
/// simply drops the event.
#[derive(Clone)]
pub struct EventBus {
    session_tx: broadcast::Sender<Event>,
    notification_tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            session_tx: broadcast::channel(capacity).0,
            notification_tx: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Session => &self.session_tx,
            Topic::Notification => &self.notification_tx,
        }
    }

    /// Publishes an event to its corresponding topic.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - normal, not an error.
            tracing::trace!("no subscribers for topic {:?}", topic);
        }
    }

    /// Subscribes to a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channel(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
