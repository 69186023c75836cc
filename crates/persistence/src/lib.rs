//! Durable-ish storage and ranked retrieval for the puzzle game.
//!
//! Three layers, bottom up:
//! - [`store`] - the generic key/value primitive ([`store::KvStore`]) with
//!   in-memory and file-backed implementations.
//! - [`service`] - leaderboard, save-slot, and stats operations, including
//!   authoritative score recording.
//! - [`api`] - the transport-agnostic request/response contract with
//!   HTTP-equivalent status mapping and fail-soft reads.

pub mod api;
pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use api::{Api, ApiError};
pub use error::{ServiceError, StoreError};
pub use service::{GameService, DEFAULT_LEADERBOARD_LIMIT};
pub use store::{FileStore, KvStore, MemoryStore};
pub use types::{GameSaveRecord, LeaderboardEntry, PlayerStats, normalize_player_name};
