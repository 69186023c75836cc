//! Deterministic session logic and data types shared across clients.
//!
//! `game-core` defines the canonical rules of a playthrough (status
//! machine, inventory, scoring) and exposes pure APIs reused by both the
//! runtime and the persistence service. All state mutation flows through
//! [`engine::SessionEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod config;
pub mod engine;
pub mod error;
pub mod scoring;
pub mod state;

pub use config::GameConfig;
pub use engine::{SessionCommand, SessionEngine, SessionEvent, SessionSnapshot};
pub use error::SessionError;
pub use state::{GameSession, GameStatus, InventoryItem};
