//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the session state machine so
//! clients can bubble them up with consistent context. Persistence failures
//! never appear here: autosave and score submission are fire-and-forget and
//! observed only by the logs.

use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("notification channel closed")]
    NotificationChannelClosed,

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a persistence service before building")]
    MissingService,

    #[error("puzzle provider not set")]
    ProviderNotSet,

    #[error(transparent)]
    Session(#[from] game_core::SessionError),
}
