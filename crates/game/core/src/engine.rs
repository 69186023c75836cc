//! Session command execution pipeline.
//!
//! [`SessionEngine`] is the authoritative reducer for [`GameSession`]. All
//! state mutation flows through [`SessionEngine::apply`], which returns the
//! events produced by the command. Commands that are invalid in the current
//! status produce no events and leave the session untouched; the runtime
//! never has to guard call ordering.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::SessionError;
use crate::state::{GameSession, GameStatus, InventoryItem};

/// A request to mutate the session.
///
/// Commands originate from puzzle modules, the UI, or the runtime's clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    /// Begin a fresh playthrough. Fails if the name trims to empty.
    Start { player_name: String },
    /// One second of game clock. Only the runtime's tick source sends this.
    Tick,
    Pause,
    Resume,
    /// Pick up an item. Re-acquiring a held id is a silent no-op.
    AcquireItem(InventoryItem),
    /// A puzzle solution check failed.
    RecordFailedAttempt,
    /// The current room's puzzle was solved.
    CompleteRoom,
    /// Resume a previously saved playthrough.
    Restore(SessionSnapshot),
    /// Discard the session and return to the menu.
    Reset,
}

/// Portable subset of a session used for save/restore.
///
/// Attempts are deliberately absent: saves do not carry them, so a restored
/// session restarts its attempt counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub player_name: String,
    pub current_room: u8,
    pub time_remaining: u32,
    pub inventory: Vec<InventoryItem>,
    pub rooms_completed: [bool; GameConfig::ROOM_COUNT],
}

impl From<&GameSession> for SessionSnapshot {
    fn from(session: &GameSession) -> Self {
        Self {
            player_name: session.player_name.clone(),
            current_room: session.current_room,
            time_remaining: session.time_remaining,
            inventory: session.inventory.clone(),
            rooms_completed: session.rooms_completed,
        }
    }
}

/// State changes produced by applying a [`SessionCommand`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started { player_name: String },
    Ticked { remaining: u32 },
    /// The clock hit zero while playing; the session is now `Lost`.
    TimeExpired,
    Paused,
    Resumed,
    ItemAcquired(InventoryItem),
    AttemptRecorded { total: u32 },
    RoomCompleted { room: u8 },
    /// The session advanced into this room.
    RoomEntered { room: u8 },
    /// All rooms complete. Emitted exactly once per session.
    GameWon { completion_time: u32, total_attempts: u32 },
    Reset,
}

/// The sole mutator of [`GameSession`].
pub struct SessionEngine<'a> {
    session: &'a mut GameSession,
    config: &'a GameConfig,
}

impl<'a> SessionEngine<'a> {
    pub fn new(session: &'a mut GameSession, config: &'a GameConfig) -> Self {
        Self { session, config }
    }

    /// Applies a command, returning the events it produced.
    ///
    /// An empty event list means the command was a no-op in the current
    /// status. Only `Start`/`Restore` with an empty name return `Err`.
    pub fn apply(&mut self, command: SessionCommand) -> Result<Vec<SessionEvent>, SessionError> {
        match command {
            SessionCommand::Start { player_name } => self.start(player_name),
            SessionCommand::Tick => Ok(self.tick()),
            SessionCommand::Pause => Ok(self.pause()),
            SessionCommand::Resume => Ok(self.resume()),
            SessionCommand::AcquireItem(item) => Ok(self.acquire_item(item)),
            SessionCommand::RecordFailedAttempt => Ok(self.record_failed_attempt()),
            SessionCommand::CompleteRoom => Ok(self.complete_room()),
            SessionCommand::Restore(snapshot) => self.restore(snapshot),
            SessionCommand::Reset => Ok(self.reset()),
        }
    }

    fn start(&mut self, player_name: String) -> Result<Vec<SessionEvent>, SessionError> {
        let player_name = player_name.trim().to_owned();
        if player_name.is_empty() {
            return Err(SessionError::EmptyPlayerName);
        }

        *self.session = GameSession::fresh(self.config, player_name.clone());
        Ok(vec![SessionEvent::Started { player_name }])
    }

    fn restore(&mut self, snapshot: SessionSnapshot) -> Result<Vec<SessionEvent>, SessionError> {
        let player_name = snapshot.player_name.trim().to_owned();
        if player_name.is_empty() {
            return Err(SessionError::EmptyPlayerName);
        }

        let room = snapshot
            .current_room
            .clamp(GameConfig::FIRST_ROOM, self.config.last_room());
        *self.session = GameSession {
            current_room: room,
            inventory: snapshot.inventory,
            time_remaining: snapshot.time_remaining.min(self.config.time_budget_secs),
            status: GameStatus::Playing,
            rooms_completed: snapshot.rooms_completed,
            player_name: player_name.clone(),
            total_attempts: 0,
        };
        Ok(vec![
            SessionEvent::Started { player_name },
            SessionEvent::RoomEntered { room },
        ])
    }

    fn tick(&mut self) -> Vec<SessionEvent> {
        if !self.session.status.is_playing() {
            return Vec::new();
        }

        // Decrement and loss detection are one atomic step.
        self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
        if self.session.time_remaining == 0 {
            self.session.status = GameStatus::Lost;
            return vec![SessionEvent::TimeExpired];
        }

        vec![SessionEvent::Ticked {
            remaining: self.session.time_remaining,
        }]
    }

    fn pause(&mut self) -> Vec<SessionEvent> {
        if !self.session.status.is_playing() {
            return Vec::new();
        }
        self.session.status = GameStatus::Paused;
        vec![SessionEvent::Paused]
    }

    fn resume(&mut self) -> Vec<SessionEvent> {
        if self.session.status != GameStatus::Paused {
            return Vec::new();
        }
        self.session.status = GameStatus::Playing;
        vec![SessionEvent::Resumed]
    }

    fn acquire_item(&mut self, item: InventoryItem) -> Vec<SessionEvent> {
        if !self.session.status.is_playing() {
            return Vec::new();
        }
        if self.session.holds_item(&item.id) {
            // Idempotent by id: no duplicate entry, no re-notification.
            return Vec::new();
        }

        self.session.inventory.push(item.clone());
        vec![SessionEvent::ItemAcquired(item)]
    }

    fn record_failed_attempt(&mut self) -> Vec<SessionEvent> {
        if !self.session.status.is_playing() {
            return Vec::new();
        }
        self.session.total_attempts += 1;
        vec![SessionEvent::AttemptRecorded {
            total: self.session.total_attempts,
        }]
    }

    fn complete_room(&mut self) -> Vec<SessionEvent> {
        if !self.session.status.is_playing() {
            return Vec::new();
        }

        let room = self.session.current_room;
        self.session.rooms_completed[usize::from(room - 1)] = true;

        if room == self.config.last_room() {
            self.session.status = GameStatus::Won;
            return vec![
                SessionEvent::RoomCompleted { room },
                SessionEvent::GameWon {
                    completion_time: self.session.elapsed_secs(self.config),
                    total_attempts: self.session.total_attempts,
                },
            ];
        }

        // The advance is atomic with the completion so completion-bound
        // events for the next room cannot land in the previous one.
        self.session.current_room = room + 1;
        vec![
            SessionEvent::RoomCompleted { room },
            SessionEvent::RoomEntered {
                room: self.session.current_room,
            },
        ]
    }

    fn reset(&mut self) -> Vec<SessionEvent> {
        *self.session = GameSession::menu(self.config);
        vec![SessionEvent::Reset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn playing_session(config: &GameConfig) -> GameSession {
        let mut session = GameSession::menu(config);
        SessionEngine::new(&mut session, config)
            .apply(SessionCommand::Start {
                player_name: "Nova".into(),
            })
            .unwrap();
        session
    }

    fn item(id: &str) -> InventoryItem {
        InventoryItem::new(id, format!("Item {id}"), "test item")
    }

    #[test]
    fn start_rejects_blank_names() {
        let config = config();
        let mut session = GameSession::menu(&config);
        let mut engine = SessionEngine::new(&mut session, &config);

        assert_eq!(
            engine.apply(SessionCommand::Start {
                player_name: "   ".into()
            }),
            Err(SessionError::EmptyPlayerName)
        );
        assert_eq!(session.status, GameStatus::Menu);
    }

    #[test]
    fn start_resets_to_initial_configuration() {
        let config = config();
        let mut session = playing_session(&config);
        session.total_attempts = 7;
        session.inventory.push(item("x"));

        SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::Start {
                player_name: "  Vex  ".into(),
            })
            .unwrap();

        assert_eq!(session.player_name, "Vex");
        assert_eq!(session.current_room, 1);
        assert_eq!(session.time_remaining, config.time_budget_secs);
        assert_eq!(session.total_attempts, 0);
        assert!(session.inventory.is_empty());
        assert_eq!(session.status, GameStatus::Playing);
    }

    #[test]
    fn tick_decrements_only_while_playing() {
        let config = config();
        let mut session = playing_session(&config);

        let events = SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::Tick)
            .unwrap();
        assert_eq!(
            events,
            vec![SessionEvent::Ticked {
                remaining: config.time_budget_secs - 1
            }]
        );

        SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::Pause)
            .unwrap();
        let events = SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::Tick)
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(session.time_remaining, config.time_budget_secs - 1);
    }

    #[test]
    fn clock_exhaustion_is_the_only_path_to_lost() {
        let config = config();
        let mut session = playing_session(&config);
        session.time_remaining = 1;

        let events = SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::Tick)
            .unwrap();
        assert_eq!(events, vec![SessionEvent::TimeExpired]);
        assert_eq!(session.status, GameStatus::Lost);
        assert_eq!(session.time_remaining, 0);

        // Terminal: no further command short of Start/Reset revives it.
        for cmd in [
            SessionCommand::Tick,
            SessionCommand::Pause,
            SessionCommand::Resume,
            SessionCommand::CompleteRoom,
        ] {
            let events = SessionEngine::new(&mut session, &config).apply(cmd).unwrap();
            assert!(events.is_empty());
            assert_eq!(session.status, GameStatus::Lost);
        }
    }

    #[test]
    fn pause_while_paused_is_a_no_op() {
        let config = config();
        let mut session = playing_session(&config);

        SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::Pause)
            .unwrap();
        let before = session.clone();

        let events = SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::Pause)
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(session, before);
    }

    #[test]
    fn acquire_item_is_idempotent_by_id() {
        let config = config();
        let mut session = playing_session(&config);

        let first = SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::AcquireItem(item("keycard")))
            .unwrap();
        assert_eq!(first.len(), 1);

        let second = SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::AcquireItem(item("keycard")))
            .unwrap();
        assert!(second.is_empty());

        assert_eq!(session.inventory.len(), 1);
        assert_eq!(session.inventory[0].id, "keycard");
    }

    #[test]
    fn attempts_accumulate_and_never_reset_mid_session() {
        let config = config();
        let mut session = playing_session(&config);

        for expected in 1..=3 {
            let events = SessionEngine::new(&mut session, &config)
                .apply(SessionCommand::RecordFailedAttempt)
                .unwrap();
            assert_eq!(events, vec![SessionEvent::AttemptRecorded { total: expected }]);
        }
        assert_eq!(session.total_attempts, 3);
    }

    #[test]
    fn complete_room_advances_in_order() {
        let config = config();
        let mut session = playing_session(&config);

        let events = SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::CompleteRoom)
            .unwrap();
        assert_eq!(
            events,
            vec![
                SessionEvent::RoomCompleted { room: 1 },
                SessionEvent::RoomEntered { room: 2 },
            ]
        );
        assert_eq!(session.current_room, 2);
        assert_eq!(session.rooms_completed, [true, false, false, false, false]);
    }

    #[test]
    fn final_room_wins_with_a_single_submission_event() {
        let config = config();
        let mut session = playing_session(&config);
        session.time_remaining = config.time_budget_secs - 42;
        session.total_attempts = 3;

        for _ in 0..4 {
            SessionEngine::new(&mut session, &config)
                .apply(SessionCommand::CompleteRoom)
                .unwrap();
        }
        let events = SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::CompleteRoom)
            .unwrap();

        assert_eq!(session.status, GameStatus::Won);
        assert_eq!(session.rooms_completed, [true; 5]);
        assert_eq!(
            events,
            vec![
                SessionEvent::RoomCompleted { room: 5 },
                SessionEvent::GameWon {
                    completion_time: 42,
                    total_attempts: 3,
                },
            ]
        );

        // Completing again emits nothing; the win is one-shot.
        let again = SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::CompleteRoom)
            .unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn restore_resumes_saved_progress_with_fresh_attempts() {
        let config = config();
        let mut session = GameSession::menu(&config);

        let snapshot = SessionSnapshot {
            player_name: "Nova".into(),
            current_room: 3,
            time_remaining: 120,
            inventory: vec![item("keycard")],
            rooms_completed: [true, true, false, false, false],
        };
        let events = SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::Restore(snapshot))
            .unwrap();

        assert_eq!(session.status, GameStatus::Playing);
        assert_eq!(session.current_room, 3);
        assert_eq!(session.time_remaining, 120);
        assert_eq!(session.total_attempts, 0);
        assert!(session.holds_item("keycard"));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn reset_returns_to_menu_and_discards_everything() {
        let config = config();
        let mut session = playing_session(&config);
        session.inventory.push(item("x"));
        session.total_attempts = 9;

        SessionEngine::new(&mut session, &config)
            .apply(SessionCommand::Reset)
            .unwrap();

        assert_eq!(session, GameSession::menu(&config));
    }
}
