//! Logical request/response contract for the persistence service.
//!
//! Transport-agnostic: any HTTP (or other) framing can mount these
//! handlers. Requests carry `Option` fields and are validated explicitly,
//! so a missing field is always a clean 400-equivalent and never a partial
//! write. Read paths are fail-soft: storage trouble degrades to an empty
//! result instead of an error, and is only visible in the logs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use game_core::{GameConfig, InventoryItem};

use crate::error::ServiceError;
use crate::service::{DEFAULT_LEADERBOARD_LIMIT, GameService};
use crate::types::{GameSaveRecord, LeaderboardEntry, PlayerStats};

/// Failures surfaced to the transport layer, each with a status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("no saved game found")]
    NotFound,

    #[error("storage failure: {0}")]
    Storage(#[from] ServiceError),
}

impl ApiError {
    /// HTTP-equivalent status code for this failure.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::MissingField(_) => 400,
            ApiError::NotFound => 404,
            ApiError::Storage(_) => 500,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitScoreRequest {
    pub player_name: Option<String>,
    pub completion_time: Option<u32>,
    pub total_attempts: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    pub success: bool,
    pub score: u32,
    pub entry: LeaderboardEntry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub success: bool,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveGameRequest {
    pub player_name: Option<String>,
    pub current_room: Option<u8>,
    pub time_remaining: Option<u32>,
    pub inventory: Option<Vec<InventoryItem>>,
    pub rooms_completed: Option<Vec<bool>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveGameResponse {
    pub success: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoadGameResponse {
    pub success: bool,
    pub save: GameSaveRecord,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: Option<PlayerStats>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Handler set over a [`GameService`].
#[derive(Clone)]
pub struct Api {
    service: GameService,
}

impl Api {
    pub fn new(service: GameService) -> Self {
        Self { service }
    }

    /// `POST /leaderboard`
    pub async fn submit_score(
        &self,
        request: SubmitScoreRequest,
    ) -> Result<SubmitScoreResponse, ApiError> {
        let player_name = request
            .player_name
            .ok_or(ApiError::MissingField("playerName"))?;
        let completion_time = request
            .completion_time
            .ok_or(ApiError::MissingField("completionTime"))?;
        let total_attempts = request
            .total_attempts
            .ok_or(ApiError::MissingField("totalAttempts"))?;

        let entry = self
            .service
            .submit_score(&player_name, completion_time, total_attempts)
            .await?;

        Ok(SubmitScoreResponse {
            success: true,
            score: entry.score,
            entry,
        })
    }

    /// `GET /leaderboard`, fail-soft.
    pub async fn leaderboard(&self) -> LeaderboardResponse {
        let entries = match self.service.leaderboard(DEFAULT_LEADERBOARD_LIMIT).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "leaderboard read failed, returning empty list");
                Vec::new()
            }
        };
        LeaderboardResponse {
            success: true,
            entries,
        }
    }

    /// `POST /save-game`
    pub async fn save_game(&self, request: SaveGameRequest) -> Result<SaveGameResponse, ApiError> {
        let player_name = request
            .player_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(ApiError::MissingField("playerName"))?;

        let mut rooms_completed = [false; GameConfig::ROOM_COUNT];
        for (slot, done) in rooms_completed
            .iter_mut()
            .zip(request.rooms_completed.unwrap_or_default())
        {
            *slot = done;
        }

        let record = GameSaveRecord {
            player_name,
            current_room: request.current_room.unwrap_or(GameConfig::FIRST_ROOM),
            time_remaining: request.time_remaining.unwrap_or(0),
            inventory: request.inventory.unwrap_or_default(),
            rooms_completed,
            saved_at: Utc::now(),
        };
        self.service.save_game(&record).await?;

        Ok(SaveGameResponse { success: true })
    }

    /// `GET /load-game/{playerName}`
    pub async fn load_game(&self, player_name: &str) -> Result<LoadGameResponse, ApiError> {
        let save = self
            .service
            .load_game(player_name)
            .await?
            .ok_or(ApiError::NotFound)?;
        Ok(LoadGameResponse {
            success: true,
            save,
        })
    }

    /// `GET /stats/{playerName}`, fail-soft like the leaderboard read.
    pub async fn stats(&self, player_name: &str) -> StatsResponse {
        let stats = match self.service.player_stats(player_name).await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, player = player_name, "stats read failed");
                None
            }
        };
        StatsResponse {
            success: true,
            stats,
        }
    }

    /// `GET /health`
    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok",
            service: "heist-api",
        }
    }
}
