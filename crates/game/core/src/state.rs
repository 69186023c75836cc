//! Authoritative session state representation.
//!
//! [`GameSession`] is the canonical snapshot of one playthrough. Runtime
//! layers clone or query this state but mutate it exclusively through
//! [`crate::engine::SessionEngine`].

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Lifecycle status of a session.
///
/// `Won` and `Lost` are terminal until a reset returns to `Menu`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    Menu,
    Playing,
    Paused,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// True once the session has reached a terminal outcome.
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// An item picked up during a playthrough.
///
/// Identity is `id`; the display fields are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl InventoryItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Canonical snapshot of one playthrough.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Current room, in `1..=GameConfig::ROOM_COUNT`.
    pub current_room: u8,
    /// Items in acquisition order, deduplicated by id.
    pub inventory: Vec<InventoryItem>,
    /// Countdown clock in seconds. Frozen at 0 on loss.
    pub time_remaining: u32,
    pub status: GameStatus,
    /// `rooms_completed[i]` is true iff room `i + 1` has been finished.
    pub rooms_completed: [bool; GameConfig::ROOM_COUNT],
    pub player_name: String,
    /// Failed solution checks across the whole session. Never decreases.
    pub total_attempts: u32,
}

impl GameSession {
    /// Creates the idle menu state that exists before any game starts.
    pub fn menu(config: &GameConfig) -> Self {
        Self {
            current_room: GameConfig::FIRST_ROOM,
            inventory: Vec::new(),
            time_remaining: config.time_budget_secs,
            status: GameStatus::Menu,
            rooms_completed: [false; GameConfig::ROOM_COUNT],
            player_name: String::new(),
            total_attempts: 0,
        }
    }

    /// Creates a fresh `Playing` session for the given player.
    ///
    /// The name must already be validated as non-empty by the engine.
    pub(crate) fn fresh(config: &GameConfig, player_name: String) -> Self {
        Self {
            current_room: GameConfig::FIRST_ROOM,
            inventory: Vec::new(),
            time_remaining: config.time_budget_secs,
            status: GameStatus::Playing,
            rooms_completed: [false; GameConfig::ROOM_COUNT],
            player_name,
            total_attempts: 0,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True if the item with this id has already been acquired.
    pub fn holds_item(&self, id: &str) -> bool {
        self.inventory.iter().any(|item| item.id == id)
    }

    /// Seconds elapsed since the session started, measured against the budget.
    pub fn elapsed_secs(&self, config: &GameConfig) -> u32 {
        config.time_budget_secs.saturating_sub(self.time_remaining)
    }
}
