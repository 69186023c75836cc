//! Session worker that owns the authoritative [`game_core::GameSession`].
//!
//! Receives commands from [`crate::SessionHandle`], applies them via
//! [`game_core::SessionEngine`], and publishes the resulting events to the
//! event bus. The 1-second game clock and the 30-second autosave both live
//! inside this worker's select loop, so every mutation of the session is
//! serialized on one task and no locking is needed.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use chrono::Utc;
use game_core::{
    GameConfig, GameSession, SessionCommand, SessionEngine, SessionError, SessionEvent,
};
use persistence::{GameSaveRecord, GameService};

use crate::events::{Event, EventBus};

/// Commands that can be sent to the session worker.
pub enum Command {
    /// Apply a session command and reply with the events it produced.
    Apply {
        command: SessionCommand,
        reply: oneshot::Sender<Result<Vec<SessionEvent>, SessionError>>,
    },
    /// Query the current session (read-only snapshot).
    Query { reply: oneshot::Sender<GameSession> },
}

/// Timer settings for the worker's periodic sources.
#[derive(Debug, Clone)]
pub struct TimerConfig {
    pub tick_interval: Duration,
    pub autosave_interval: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            autosave_interval: Duration::from_secs(30),
        }
    }
}

/// Background task that serializes all session mutation.
pub struct SessionWorker {
    session: GameSession,
    game_config: GameConfig,
    timers: TimerConfig,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    service: GameService,

    /// Game clock; armed exactly while the session is `Playing`. Dropping
    /// the interval is the cancellation the state machine requires: a
    /// stale tick cannot fire after a pause.
    clock: Option<Interval>,
    /// Autosave schedule; armed together with the clock.
    autosave: Option<Interval>,
    /// Most recent autosave task, used to skip a cycle while one is still
    /// in flight.
    save_task: Option<JoinHandle<()>>,
}

impl SessionWorker {
    pub fn new(
        game_config: GameConfig,
        timers: TimerConfig,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        service: GameService,
    ) -> Self {
        Self {
            session: GameSession::menu(&game_config),
            game_config,
            timers,
            command_rx,
            event_bus,
            service,
            clock: None,
            autosave: None,
            save_task: None,
        }
    }

    /// Main worker loop. Runs until every command sender is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                maybe_cmd = self.command_rx.recv() => {
                    match maybe_cmd {
                        Some(cmd) => self.handle_command(cmd),
                        None => break,
                    }
                }
                _ = tick_next(&mut self.clock) => {
                    self.apply_and_publish(SessionCommand::Tick);
                }
                _ = tick_next(&mut self.autosave) => {
                    self.spawn_autosave();
                }
            }
        }
        debug!(target: "runtime::worker", "session worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Apply { command, reply } => {
                let result = self.apply(command);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "apply reply channel closed (caller dropped)");
                }
            }
            Command::Query { reply } => {
                if reply.send(self.session.clone()).is_err() {
                    debug!(target: "runtime::worker", "query reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn apply_and_publish(&mut self, command: SessionCommand) {
        // Tick cannot fail; the Err arm exists for the shared apply path.
        if let Err(error) = self.apply(command) {
            warn!(target: "runtime::worker", error = %error, "internal command rejected");
        }
    }

    /// Applies a command through the engine, publishes its events, and
    /// reconciles the timers with the resulting status.
    fn apply(&mut self, command: SessionCommand) -> Result<Vec<SessionEvent>, SessionError> {
        let events = SessionEngine::new(&mut self.session, &self.game_config).apply(command)?;

        for event in &events {
            self.react(event);
            self.event_bus.publish(Event::Session(event.clone()));
        }
        self.reconcile_timers();

        Ok(events)
    }

    /// Side effects bound to specific transitions.
    fn react(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::GameWon {
                completion_time,
                total_attempts,
            } => {
                self.spawn_score_submission(*completion_time, *total_attempts);
            }
            SessionEvent::TimeExpired => {
                info!(
                    target: "runtime::worker",
                    player = %self.session.player_name,
                    "time expired, session lost"
                );
            }
            _ => {}
        }
    }

    /// Arms the clock and autosave while `Playing`, drops them otherwise.
    fn reconcile_timers(&mut self) {
        if self.session.status().is_playing() {
            if self.clock.is_none() {
                self.clock = Some(periodic(self.timers.tick_interval));
                self.autosave = Some(periodic(self.timers.autosave_interval));
            }
        } else if self.clock.is_some() {
            self.clock = None;
            self.autosave = None;
        }
    }

    /// Best-effort, fire-and-forget save of the current session.
    ///
    /// Failures are logged and dropped until the next scheduled cycle. A
    /// cycle is skipped entirely while the previous save is still in
    /// flight; the overwrite semantics of the save slot make any remaining
    /// race harmless.
    fn spawn_autosave(&mut self) {
        if let Some(task) = &self.save_task
            && !task.is_finished()
        {
            debug!(target: "runtime::worker", "autosave still in flight, skipping cycle");
            return;
        }

        let record = GameSaveRecord {
            player_name: self.session.player_name.clone(),
            current_room: self.session.current_room,
            time_remaining: self.session.time_remaining,
            inventory: self.session.inventory.clone(),
            rooms_completed: self.session.rooms_completed,
            saved_at: Utc::now(),
        };
        let service = self.service.clone();

        self.save_task = Some(tokio::spawn(async move {
            match service.save_game(&record).await {
                Ok(()) => debug!(target: "runtime::worker", player = %record.player_name, "autosave complete"),
                Err(error) => warn!(target: "runtime::worker", error = %error, "autosave failed"),
            }
        }));
    }

    /// One-shot leaderboard submission on a win. The session transition
    /// never waits on, or depends on, the outcome.
    fn spawn_score_submission(&self, completion_time: u32, total_attempts: u32) {
        let service = self.service.clone();
        let player_name = self.session.player_name.clone();

        tokio::spawn(async move {
            match service
                .submit_score(&player_name, completion_time, total_attempts)
                .await
            {
                Ok(entry) => info!(
                    target: "runtime::worker",
                    player = %player_name,
                    score = entry.score,
                    "score submitted"
                ),
                Err(error) => warn!(
                    target: "runtime::worker",
                    player = %player_name,
                    error = %error,
                    "score submission failed"
                ),
            }
        });
    }
}

/// Returns a repeating interval whose first firing is one full period out.
fn periodic(period: Duration) -> Interval {
    let mut interval = time::interval_at(time::Instant::now() + period, period);
    // A burst of catch-up ticks after a stall would drain the clock unfairly.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Completes on the next firing of an armed interval; pends forever when
/// the interval is disarmed.
async fn tick_next(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
