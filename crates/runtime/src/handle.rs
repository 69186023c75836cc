//! Cloneable façade for issuing commands to the runtime.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers that
//! mirror the puzzle-module contract: completing rooms, acquiring items,
//! recording failed attempts, and posting notifications.

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{GameSession, InventoryItem, SessionCommand, SessionEvent, SessionSnapshot};

use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    message_tx: mpsc::Sender<String>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        message_tx: mpsc::Sender<String>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            command_tx,
            message_tx,
            event_bus,
        }
    }

    /// Starts a fresh playthrough for the given player.
    pub async fn start(&self, player_name: impl Into<String>) -> Result<()> {
        self.apply(SessionCommand::Start {
            player_name: player_name.into(),
        })
        .await?;
        Ok(())
    }

    /// Resumes a playthrough from a saved snapshot.
    pub async fn restore(&self, snapshot: SessionSnapshot) -> Result<()> {
        self.apply(SessionCommand::Restore(snapshot)).await?;
        Ok(())
    }

    /// Suspends the clock. No-op unless currently playing.
    pub async fn pause(&self) -> Result<()> {
        self.apply(SessionCommand::Pause).await?;
        Ok(())
    }

    /// Resumes the clock. No-op unless currently paused.
    pub async fn resume(&self) -> Result<()> {
        self.apply(SessionCommand::Resume).await?;
        Ok(())
    }

    /// Adds an item to the inventory, deduplicated by id.
    pub async fn acquire_item(&self, item: InventoryItem) -> Result<()> {
        self.apply(SessionCommand::AcquireItem(item)).await?;
        Ok(())
    }

    /// Records one failed solution check.
    pub async fn record_failed_attempt(&self) -> Result<()> {
        self.apply(SessionCommand::RecordFailedAttempt).await?;
        Ok(())
    }

    /// Marks the current room solved, advancing or winning as appropriate.
    pub async fn complete_room(&self) -> Result<()> {
        self.apply(SessionCommand::CompleteRoom).await?;
        Ok(())
    }

    /// Discards the session and returns to the menu.
    pub async fn reset(&self) -> Result<()> {
        self.apply(SessionCommand::Reset).await?;
        Ok(())
    }

    /// Posts a transient notification. Fire-and-forget, no acknowledgment.
    pub async fn show_notification(&self, message: impl Into<String>) -> Result<()> {
        self.message_tx
            .send(message.into())
            .await
            .map_err(|_| RuntimeError::NotificationChannelClosed)
    }

    /// Queries the current session (read-only snapshot).
    pub async fn query_session(&self) -> Result<GameSession> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Query { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribes to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Applies a session command, returning the events it produced.
    pub async fn apply(&self, command: SessionCommand) -> Result<Vec<SessionEvent>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Apply {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        let events = reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)??;
        Ok(events)
    }
}
