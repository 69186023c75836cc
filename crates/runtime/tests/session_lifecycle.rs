//! End-to-end session lifecycle under a controlled clock.
//!
//! All tests run with tokio's paused time: `advance` fires the worker's
//! intervals deterministically, and pausing the session must leave no
//! armed timer behind for `advance` to trigger.

use std::sync::Arc;
use std::time::Duration;

use game_core::{GameConfig, GameStatus, InventoryItem, SessionCommand};
use persistence::{GameService, MemoryStore};
use runtime::{Runtime, RuntimeConfig};

fn test_config() -> RuntimeConfig {
    RuntimeConfig {
        game: GameConfig::default(),
        ..RuntimeConfig::default()
    }
}

fn build_runtime(config: RuntimeConfig) -> (Runtime, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let runtime = Runtime::builder()
        .config(config)
        .service(GameService::new(store.clone()))
        .build()
        .expect("runtime should build");
    (runtime, store)
}

/// Lets spawned persistence tasks run to completion.
async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn clock_ticks_once_per_second_while_playing() {
    let (runtime, _store) = build_runtime(test_config());
    let handle = runtime.handle();

    handle.start("Nova").await.unwrap();
    tokio::time::advance(Duration::from_secs(5)).await;

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(
        session.time_remaining,
        GameConfig::DEFAULT_TIME_BUDGET_SECS - 5
    );
}

#[tokio::test(start_paused = true)]
async fn pause_suspends_the_clock_entirely() {
    let (runtime, _store) = build_runtime(test_config());
    let handle = runtime.handle();

    handle.start("Nova").await.unwrap();
    tokio::time::advance(Duration::from_secs(10)).await;
    handle.pause().await.unwrap();

    let before = handle.query_session().await.unwrap();
    assert_eq!(before.status(), GameStatus::Paused);

    // With the session paused the worker holds no armed interval, so
    // advancing wall-clock time must not move the game clock at all.
    tokio::time::advance(Duration::from_secs(120)).await;

    let after = handle.query_session().await.unwrap();
    assert_eq!(after.time_remaining, before.time_remaining);
    assert_eq!(after.status(), GameStatus::Paused);

    // Pausing again changes nothing.
    handle.pause().await.unwrap();
    assert_eq!(handle.query_session().await.unwrap(), after);

    handle.resume().await.unwrap();
    tokio::time::advance(Duration::from_secs(3)).await;
    let resumed = handle.query_session().await.unwrap();
    assert_eq!(resumed.time_remaining, before.time_remaining - 3);
}

#[tokio::test(start_paused = true)]
async fn clock_exhaustion_loses_and_stays_lost() {
    let mut config = test_config();
    config.game = GameConfig::with_time_budget(3);
    let (runtime, _store) = build_runtime(config);
    let handle = runtime.handle();

    handle.start("Nova").await.unwrap();
    tokio::time::advance(Duration::from_secs(3)).await;

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.status(), GameStatus::Lost);
    assert_eq!(session.time_remaining, 0);

    // Terminal: more wall-clock time and stray commands change nothing.
    tokio::time::advance(Duration::from_secs(60)).await;
    handle.resume().await.unwrap();
    handle.complete_room().await.unwrap();

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.status(), GameStatus::Lost);
    assert_eq!(session.time_remaining, 0);
}

#[tokio::test(start_paused = true)]
async fn losses_are_never_submitted_to_the_leaderboard() {
    let mut config = test_config();
    config.game = GameConfig::with_time_budget(2);
    let (runtime, store) = build_runtime(config);
    let handle = runtime.handle();

    handle.start("Nova").await.unwrap();
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;

    assert_eq!(handle.query_session().await.unwrap().status(), GameStatus::Lost);
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn item_acquisition_is_idempotent_through_the_handle() {
    let (runtime, _store) = build_runtime(test_config());
    let handle = runtime.handle();

    handle.start("Nova").await.unwrap();
    let keycard = InventoryItem::new("keycard-level-1", "Level 1 Keycard", "Opens the lobby door");
    handle.acquire_item(keycard.clone()).await.unwrap();
    handle.acquire_item(keycard).await.unwrap();

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.inventory.len(), 1);
    assert_eq!(session.inventory[0].id, "keycard-level-1");
}

#[tokio::test(start_paused = true)]
async fn winning_submits_exactly_one_leaderboard_entry() {
    let (runtime, store) = build_runtime(test_config());
    let handle = runtime.handle();

    handle.start("Nova").await.unwrap();
    tokio::time::advance(Duration::from_secs(40)).await;
    for _ in 0..2 {
        handle.record_failed_attempt().await.unwrap();
    }
    for _ in 0..5 {
        handle.complete_room().await.unwrap();
    }

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.rooms_completed, [true; 5]);

    settle().await;
    let service = GameService::new(store.clone());
    let entries = service.leaderboard(50).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].player_name, "Nova");
    assert_eq!(entries[0].completion_time, 40);
    assert_eq!(entries[0].total_attempts, 2);

    // A stray extra completion must not produce a second entry.
    handle.complete_room().await.unwrap();
    settle().await;
    assert_eq!(service.leaderboard(50).await.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn restore_resumes_saved_progress() {
    let (runtime, store) = build_runtime(test_config());
    let handle = runtime.handle();

    let service = GameService::new(store);
    let record = persistence::GameSaveRecord {
        player_name: "Nova".into(),
        current_room: 4,
        time_remaining: 90,
        inventory: vec![InventoryItem::new("access-token", "Network Access Token", "")],
        rooms_completed: [true, true, true, false, false],
        saved_at: chrono::Utc::now(),
    };
    service.save_game(&record).await.unwrap();

    let loaded = service.load_game("nova").await.unwrap().unwrap();
    handle.restore(loaded.into()).await.unwrap();

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.current_room, 4);
    assert_eq!(session.time_remaining, 90);
    assert_eq!(session.total_attempts, 0);
    assert!(session.holds_item("access-token"));

    // The restored clock runs.
    tokio::time::advance(Duration::from_secs(4)).await;
    assert_eq!(handle.query_session().await.unwrap().time_remaining, 86);
}

#[tokio::test(start_paused = true)]
async fn reset_returns_to_menu_and_stops_the_clock() {
    let (runtime, _store) = build_runtime(test_config());
    let handle = runtime.handle();

    handle.start("Nova").await.unwrap();
    tokio::time::advance(Duration::from_secs(5)).await;
    handle.reset().await.unwrap();

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.status(), GameStatus::Menu);
    assert_eq!(session.time_remaining, GameConfig::DEFAULT_TIME_BUDGET_SECS);

    tokio::time::advance(Duration::from_secs(30)).await;
    assert_eq!(
        handle.query_session().await.unwrap().time_remaining,
        GameConfig::DEFAULT_TIME_BUDGET_SECS
    );
}

#[tokio::test(start_paused = true)]
async fn empty_player_name_is_the_only_hard_start_failure() {
    let (runtime, _store) = build_runtime(test_config());
    let handle = runtime.handle();

    assert!(handle.start("   ").await.is_err());
    assert_eq!(handle.query_session().await.unwrap().status(), GameStatus::Menu);

    // Out-of-order commands are silent no-ops, not errors.
    assert!(handle.pause().await.is_ok());
    assert!(handle.complete_room().await.is_ok());
    assert!(
        handle
            .apply(SessionCommand::Tick)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test(start_paused = true)]
async fn concurrent_runtimes_do_not_cross_talk() {
    let (first, _) = build_runtime(test_config());
    let (second, _) = build_runtime(test_config());

    first.handle().start("Ada").await.unwrap();
    second.handle().start("Grace").await.unwrap();

    first.handle().record_failed_attempt().await.unwrap();
    first.handle().complete_room().await.unwrap();

    let a = first.handle().query_session().await.unwrap();
    let b = second.handle().query_session().await.unwrap();
    assert_eq!(a.current_room, 2);
    assert_eq!(a.total_attempts, 1);
    assert_eq!(b.current_room, 1);
    assert_eq!(b.total_attempts, 0);
    assert_eq!(b.player_name, "Grace");
}

#[tokio::test(start_paused = true)]
async fn shutdown_joins_all_workers() {
    let (runtime, _store) = build_runtime(test_config());
    runtime.handle().start("Nova").await.unwrap();
    runtime.shutdown().await.expect("clean shutdown");
}
