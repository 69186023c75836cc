//! Records owned by the persistence service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use game_core::{GameConfig, InventoryItem, SessionSnapshot};

/// Key prefix for leaderboard entries.
pub const LEADERBOARD_PREFIX: &str = "leaderboard_";
/// Key prefix for save-game records.
pub const SAVE_PREFIX: &str = "save_";

/// One win on the leaderboard. Append-only: written once, never mutated.
///
/// The `id` is the storage key. Responses carry it per entry; the stored
/// value does not (the service strips it on write and fills it back in
/// from the key on read).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub id: String,
    pub player_name: String,
    pub completion_time: u32,
    pub total_attempts: u32,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

/// One live save slot per normalized player name, overwritten on each save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSaveRecord {
    pub player_name: String,
    pub current_room: u8,
    pub time_remaining: u32,
    pub inventory: Vec<InventoryItem>,
    pub rooms_completed: [bool; GameConfig::ROOM_COUNT],
    pub saved_at: DateTime<Utc>,
}

impl From<GameSaveRecord> for SessionSnapshot {
    fn from(record: GameSaveRecord) -> Self {
        Self {
            player_name: record.player_name,
            current_room: record.current_room,
            time_remaining: record.time_remaining,
            inventory: record.inventory,
            rooms_completed: record.rooms_completed,
        }
    }
}

/// Aggregate of a player's leaderboard entries.
///
/// `best_score` and `best_time` are independent maxima/minima; they need
/// not come from the same entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub best_score: u32,
    pub best_time: u32,
    pub total_completions: u32,
}

/// Case-folds a player name and collapses whitespace runs to `_`.
///
/// Two names differing only in case or spacing alias to the same save slot.
pub fn normalize_player_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
