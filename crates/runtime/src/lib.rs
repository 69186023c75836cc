//! Async session controller for the puzzle game.
//!
//! Owns the canonical [`game_core::GameSession`] behind a worker task,
//! drives the countdown clock and autosave schedule, and distributes
//! state-change events over a topic-based bus. Persistence calls are
//! dispatched fire-and-forget so a slow or failed store can never stall
//! the clock.

mod error;
mod events;
mod handle;
mod provider;
mod runtime;
mod workers;

pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, NotificationEvent, Topic};
pub use handle::SessionHandle;
pub use provider::{PuzzleEvent, PuzzleProvider};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
