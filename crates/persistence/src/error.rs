//! Error types raised by the storage and service layers.

use thiserror::Error;

/// Errors surfaced by key/value store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted key in store: {0}")]
    CorruptedKey(String),
}

/// Errors surfaced by [`crate::service::GameService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("player name must not be empty")]
    EmptyPlayerName,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
