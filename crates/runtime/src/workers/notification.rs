//! Transient notification worker.
//!
//! Notices are fire-and-forget display messages, independent of session
//! state. Each posted message restarts a single clear timer; when the
//! window elapses with no newer message a `Cleared` event is published.

use std::pin::Pin;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Sleep, sleep};
use tracing::debug;

use crate::events::{Event, EventBus, NotificationEvent};

/// Default display window before a notice clears itself.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

pub struct NotificationWorker {
    message_rx: mpsc::Receiver<String>,
    event_bus: EventBus,
    ttl: Duration,
}

impl NotificationWorker {
    pub fn new(message_rx: mpsc::Receiver<String>, event_bus: EventBus, ttl: Duration) -> Self {
        Self {
            message_rx,
            event_bus,
            ttl,
        }
    }

    pub async fn run(mut self) {
        // At most one clear timer is pending; a new message supersedes it.
        let mut clear_at: Option<Pin<Box<Sleep>>> = None;

        loop {
            tokio::select! {
                maybe_message = self.message_rx.recv() => {
                    match maybe_message {
                        Some(message) => {
                            self.event_bus
                                .publish(Event::Notification(NotificationEvent::Posted { message }));
                            clear_at = Some(Box::pin(sleep(self.ttl)));
                        }
                        None => break,
                    }
                }
                _ = wait(&mut clear_at), if clear_at.is_some() => {
                    clear_at = None;
                    self.event_bus
                        .publish(Event::Notification(NotificationEvent::Cleared));
                }
            }
        }
        debug!(target: "runtime::worker", "notification worker stopped");
    }
}

async fn wait(clear_at: &mut Option<Pin<Box<Sleep>>>) {
    match clear_at {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
