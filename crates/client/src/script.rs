//! Scripted playthrough of the five rooms.
//!
//! Stands in for an interactive frontend: each room yields its pickups,
//! the occasional wrong guess, and finally the solve. The runtime treats
//! it exactly like a real puzzle module.

use async_trait::async_trait;

use game_core::{GameSession, InventoryItem};
use runtime::{PuzzleEvent, PuzzleProvider, Result};

/// Plays every room from a fixed script, one batch per room.
pub struct ScriptedProvider;

#[async_trait]
impl PuzzleProvider for ScriptedProvider {
    async fn provide_events(&self, room: u8, _session: &GameSession) -> Result<Vec<PuzzleEvent>> {
        let mut events = match room {
            1 => vec![
                PuzzleEvent::Notice("You slip into the lobby".into()),
                PuzzleEvent::ItemFound(InventoryItem::new(
                    "keycard-level-1",
                    "Level 1 Keycard",
                    "Opens the service elevator",
                )),
            ],
            2 => vec![
                // First guess at the terminal password is wrong.
                PuzzleEvent::AttemptFailed,
                PuzzleEvent::ItemFound(InventoryItem::new(
                    "access-token",
                    "Network Access Token",
                    "Authenticates against the internal network",
                )),
            ],
            3 => vec![
                PuzzleEvent::Notice("The laser grid powers down".into()),
                PuzzleEvent::ItemFound(InventoryItem::new(
                    "infrared-goggles",
                    "Infrared Goggles",
                    "Reveals the pressure plates",
                )),
            ],
            4 => vec![PuzzleEvent::AttemptFailed, PuzzleEvent::AttemptFailed],
            _ => vec![PuzzleEvent::Notice("The vault door swings open".into())],
        };
        events.push(PuzzleEvent::Solved);
        Ok(events)
    }
}
