//! Errors surfaced by the session state machine.
//!
//! Out-of-order commands (pausing a finished game, completing a room twice)
//! are deliberately not errors: UI event ordering cannot be fully
//! controlled, so the engine swallows them as no-ops. Only preconditions
//! that would corrupt a session are hard failures.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `Start` or `Restore` was given a player name that trims to empty.
    #[error("player name must not be empty")]
    EmptyPlayerName,
}
