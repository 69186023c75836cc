//! Event payloads for the notification topic.
//!
//! Session-topic payloads are [`game_core::SessionEvent`] values published
//! verbatim by the session worker.

use serde::{Deserialize, Serialize};

/// Transient notice lifecycle. Notifications never touch session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationEvent {
    /// A message was posted for display.
    Posted { message: String },
    /// The display window elapsed with no newer message.
    Cleared,
}
