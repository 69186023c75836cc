//! High-level runtime orchestrator.
//!
//! The runtime owns the background workers, wires up command/event
//! channels, and exposes a builder-based API for clients to drive a
//! session. [`crate::SessionHandle`] is the cloneable façade clients hold.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use game_core::{GameConfig, GameStatus};
use persistence::GameService;

use crate::error::{Result, RuntimeError};
use crate::events::EventBus;
use crate::handle::SessionHandle;
use crate::provider::{PuzzleEvent, PuzzleProvider};
use crate::workers::{
    Command, DEFAULT_NOTIFICATION_TTL, NotificationWorker, SessionWorker, TimerConfig,
};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Cadence of the session clock. One game second per firing.
    pub tick_interval: Duration,
    /// Cadence of the best-effort autosave.
    pub autosave_interval: Duration,
    /// Display window for transient notifications.
    pub notification_ttl: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let timers = TimerConfig::default();
        Self {
            game: GameConfig::default(),
            tick_interval: timers.tick_interval,
            autosave_interval: timers.autosave_interval,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates one game session.
///
/// Design: the runtime owns the workers and coordinates execution;
/// [`SessionHandle`] provides a cloneable façade for clients. Multiple
/// runtimes coexist freely; each owns its session outright.
pub struct Runtime {
    handle: SessionHandle,
    provider: Option<Box<dyn PuzzleProvider>>,
    session_worker: JoinHandle<()>,
    notification_worker: JoinHandle<()>,
}

impl Runtime {
    /// Creates a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Gets a cloneable handle to this runtime.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Drives the configured puzzle provider for one batch of events.
    ///
    /// Returns `false` once the session is no longer playing.
    pub async fn step(&self) -> Result<bool> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let session = self.handle.query_session().await?;
        if !session.status().is_playing() {
            return Ok(false);
        }

        let events = provider.provide_events(session.current_room, &session).await?;
        for event in events {
            match event {
                PuzzleEvent::ItemFound(item) => {
                    let name = item.name.clone();
                    self.handle.acquire_item(item).await?;
                    self.handle
                        .show_notification(format!("Added to inventory: {name}"))
                        .await?;
                }
                PuzzleEvent::AttemptFailed => self.handle.record_failed_attempt().await?,
                PuzzleEvent::Notice(message) => self.handle.show_notification(message).await?,
                PuzzleEvent::Solved => self.handle.complete_room().await?,
            }
        }

        let session = self.handle.query_session().await?;
        Ok(session.status() == GameStatus::Playing || session.status() == GameStatus::Paused)
    }

    /// Runs the provider loop until the session leaves play.
    pub async fn run(&self) -> Result<GameStatus> {
        while self.step().await? {}
        let session = self.handle.query_session().await?;
        Ok(session.status())
    }

    /// Shuts down the runtime gracefully.
    pub async fn shutdown(self) -> Result<()> {
        // Dropping the handle closes both command channels; the workers
        // drain and exit.
        drop(self.handle);
        drop(self.provider);

        self.session_worker.await.map_err(RuntimeError::WorkerJoin)?;
        self.notification_worker
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    service: Option<GameService>,
    provider: Option<Box<dyn PuzzleProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            service: None,
            provider: None,
        }
    }

    /// Overrides runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the required persistence service.
    pub fn service(mut self, service: GameService) -> Self {
        self.service = Some(service);
        self
    }

    /// Sets the puzzle provider (optional; required for `step`/`run`).
    pub fn provider(mut self, provider: impl PuzzleProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Builds the runtime and spawns its workers.
    pub fn build(self) -> Result<Runtime> {
        let service = self.service.ok_or(RuntimeError::MissingService)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (message_tx, message_rx) = mpsc::channel::<String>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = SessionHandle::new(command_tx, message_tx, event_bus.clone());

        let session_worker = SessionWorker::new(
            self.config.game.clone(),
            TimerConfig {
                tick_interval: self.config.tick_interval,
                autosave_interval: self.config.autosave_interval,
            },
            command_rx,
            event_bus.clone(),
            service,
        );
        let session_worker = tokio::spawn(async move {
            session_worker.run().await;
        });

        let notification_worker =
            NotificationWorker::new(message_rx, event_bus, self.config.notification_ttl);
        let notification_worker = tokio::spawn(async move {
            notification_worker.run().await;
        });

        debug!("runtime workers spawned");
        Ok(Runtime {
            handle,
            provider: self.provider,
            session_worker,
            notification_worker,
        })
    }
}
