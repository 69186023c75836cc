//! Leaderboard, save-slot, and stats operations over a [`KvStore`].

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use game_core::scoring;

use crate::error::Result;
use crate::error::ServiceError;
use crate::store::KvStore;
use crate::types::{
    GameSaveRecord, LeaderboardEntry, PlayerStats, normalize_player_name, LEADERBOARD_PREFIX,
    SAVE_PREFIX,
};

/// Default number of entries returned by [`GameService::leaderboard`].
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 50;

/// Ranked persistence over a generic key/value primitive.
///
/// The store has no cross-key transactions; every operation here is a
/// single-key write or a prefix scan, and concurrent writers from other
/// sessions may interleave arbitrarily.
#[derive(Clone)]
pub struct GameService {
    store: Arc<dyn KvStore>,
}

impl GameService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Records one win on the leaderboard.
    ///
    /// Each call appends a new entry; a player may have many. Entry ids are
    /// UUID-based so concurrent submissions cannot collide without any
    /// cross-session coordination.
    pub async fn submit_score(
        &self,
        player_name: &str,
        completion_time: u32,
        total_attempts: u32,
    ) -> Result<LeaderboardEntry> {
        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(ServiceError::EmptyPlayerName);
        }

        let entry = LeaderboardEntry {
            id: format!("{LEADERBOARD_PREFIX}{}", Uuid::new_v4()),
            player_name: player_name.to_owned(),
            completion_time,
            total_attempts,
            score: scoring::score(completion_time, total_attempts),
            completed_at: Utc::now(),
        };

        // The key already carries the id; the stored value stays id-free.
        let mut value = serde_json::to_value(&entry)?;
        if let Some(map) = value.as_object_mut() {
            map.remove("id");
        }
        self.store.set(&entry.id, value).await?;

        info!(
            player = %entry.player_name,
            score = entry.score,
            "leaderboard entry saved"
        );
        Ok(entry)
    }

    /// Top entries sorted by score descending, at most `limit`.
    ///
    /// Records failing the structural check (missing player name,
    /// non-numeric score or completion time) are dropped, not errors. The
    /// sort is stable, so ties keep scan order.
    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let raw = self.store.get_by_prefix(LEADERBOARD_PREFIX).await?;

        let mut entries: Vec<LeaderboardEntry> = raw
            .into_iter()
            .filter_map(|(key, value)| parse_entry(&key, value))
            .collect();

        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Overwrites the save slot for the record's normalized player name.
    pub async fn save_game(&self, record: &GameSaveRecord) -> Result<()> {
        let normalized = normalize_player_name(&record.player_name);
        if normalized.is_empty() {
            return Err(ServiceError::EmptyPlayerName);
        }

        let key = format!("{SAVE_PREFIX}{normalized}");
        self.store
            .set(&key, serde_json::to_value(record)?)
            .await?;

        debug!(player = %record.player_name, key = %key, "game saved");
        Ok(())
    }

    /// Loads the save slot for a player, if one exists.
    pub async fn load_game(&self, player_name: &str) -> Result<Option<GameSaveRecord>> {
        let key = format!("{SAVE_PREFIX}{}", normalize_player_name(player_name));
        let Some(value) = self.store.get(&key).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(value)?))
    }

    /// Aggregates all of a player's wins, matching names case-insensitively.
    ///
    /// Returns `None` when the player has no valid leaderboard entries.
    pub async fn player_stats(&self, player_name: &str) -> Result<Option<PlayerStats>> {
        let wanted = player_name.trim().to_lowercase();
        let raw = self.store.get_by_prefix(LEADERBOARD_PREFIX).await?;

        let matching: Vec<LeaderboardEntry> = raw
            .into_iter()
            .filter_map(|(key, value)| parse_entry(&key, value))
            .filter(|entry| entry.player_name.to_lowercase() == wanted)
            .collect();

        let Some(first) = matching.first() else {
            return Ok(None);
        };

        let mut stats = PlayerStats {
            best_score: first.score,
            best_time: first.completion_time,
            total_completions: matching.len() as u32,
        };
        for entry in &matching[1..] {
            stats.best_score = stats.best_score.max(entry.score);
            stats.best_time = stats.best_time.min(entry.completion_time);
        }
        Ok(Some(stats))
    }
}

/// Structural validity check: a record that does not deserialize into a
/// well-formed entry is silently discarded.
fn parse_entry(key: &str, value: Value) -> Option<LeaderboardEntry> {
    match serde_json::from_value::<LeaderboardEntry>(value) {
        Ok(mut entry) => {
            entry.id = key.to_owned();
            if entry.player_name.is_empty() {
                debug!(key, "dropping leaderboard record with empty player name");
                return None;
            }
            Some(entry)
        }
        Err(err) => {
            debug!(key, error = %err, "dropping malformed leaderboard record");
            None
        }
    }
}
