//! Puzzle-module boundary.
//!
//! The five rooms are external collaborators: each one validates its own
//! static solution and reports progress through the events below. Room
//! internals (clue text, UI) never reach the runtime.

use async_trait::async_trait;

use game_core::{GameSession, InventoryItem};

use crate::error::Result;

/// What a puzzle module reports back while the player works a room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PuzzleEvent {
    /// An item was picked up. The controller deduplicates by id.
    ItemFound(InventoryItem),
    /// A solution check failed.
    AttemptFailed,
    /// Fire-and-forget display message.
    Notice(String),
    /// The room's static solution was matched. Fires at most once per room.
    Solved,
}

/// Source of puzzle events for the current room.
///
/// Implementations range from scripted sequences (tests, demos) to real
/// interactive frontends.
#[async_trait]
pub trait PuzzleProvider: Send + Sync {
    /// Produces the next batch of events for `room`.
    ///
    /// Called repeatedly while the session is playing; the session snapshot
    /// reflects all previously applied events.
    async fn provide_events(&self, room: u8, session: &GameSession) -> Result<Vec<PuzzleEvent>>;
}
