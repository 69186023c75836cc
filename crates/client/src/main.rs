//! Heist client binary.
//!
//! Composition root: picks a store from the environment, assembles the
//! persistence service and the runtime, then plays one scripted run of
//! the five rooms and prints the resulting leaderboard and stats.
//!
//! Environment:
//! - `HEIST_STORE`: `memory` (default) or `file`
//! - `HEIST_STORE_PATH`: directory for the file store (default `heist-data`)
//! - `HEIST_PLAYER`: player name for the run (default `Nova`)
//! - `RUST_LOG`: tracing filter, e.g. `info,runtime=debug`

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use persistence::{Api, FileStore, GameService, KvStore, MemoryStore};
use runtime::{Event, NotificationEvent, Runtime, Topic};

mod script;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let store = build_store().await?;
    let service = GameService::new(store);
    let api = Api::new(service.clone());

    let health = api.health();
    tracing::info!(status = health.status, service = health.service, "persistence ready");

    let runtime = Runtime::builder()
        .service(service)
        .provider(script::ScriptedProvider)
        .build()
        .context("failed to build runtime")?;
    let handle = runtime.handle();

    // Print notices the way a frontend would display them.
    let mut notifications = handle.subscribe(Topic::Notification);
    let printer = tokio::spawn(async move {
        while let Ok(event) = notifications.recv().await {
            if let Event::Notification(NotificationEvent::Posted { message }) = event {
                println!(">> {message}");
            }
        }
    });

    let player = std::env::var("HEIST_PLAYER").unwrap_or_else(|_| "Nova".into());
    tracing::info!(player = %player, "starting playthrough");
    handle.start(&player).await?;

    let outcome = runtime.run().await?;
    let session = handle.query_session().await?;
    println!(
        "Run finished: {outcome} in {} attempts with {}s left",
        session.total_attempts, session.time_remaining
    );

    runtime.shutdown().await?;
    printer.abort();

    // Score submission is fire-and-forget on a detached task; give it a
    // moment to land before reading.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let leaderboard = api.leaderboard().await;
    println!("\nLeaderboard:");
    for (rank, entry) in leaderboard.entries.iter().enumerate() {
        println!(
            "  {}. {} - {} pts ({}s, {} attempts)",
            rank + 1,
            entry.player_name,
            entry.score,
            entry.completion_time,
            entry.total_attempts
        );
    }

    let stats = api.stats(&player).await;
    if let Some(stats) = stats.stats {
        println!(
            "\n{player}: best score {}, best time {}s, {} completions",
            stats.best_score, stats.best_time, stats.total_completions
        );
    }

    Ok(())
}

/// Chooses the backing store from `HEIST_STORE`.
async fn build_store() -> Result<Arc<dyn KvStore>> {
    let kind = std::env::var("HEIST_STORE").unwrap_or_else(|_| "memory".into());
    match kind.as_str() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "file" => {
            let path = std::env::var("HEIST_STORE_PATH").unwrap_or_else(|_| "heist-data".into());
            let store = FileStore::open(&path)
                .await
                .with_context(|| format!("failed to open file store at {path}"))?;
            Ok(Arc::new(store))
        }
        other => anyhow::bail!("unknown HEIST_STORE value: {other}"),
    }
}
