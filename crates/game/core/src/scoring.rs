//! Deterministic score computation.
//!
//! This function is the single scoring authority: the client calls it for
//! display and the persistence service calls it when recording a win, so a
//! display/leaderboard mismatch cannot occur. A lost session always scores
//! 0 and is never submitted.

use crate::config::GameConfig;

/// Base score awarded for any completed playthrough.
pub const BASE_SCORE: u32 = 10_000;
/// Bonus per second left under the time budget.
pub const TIME_BONUS_PER_SEC: u32 = 10;
/// Penalty per failed solution attempt.
pub const ATTEMPT_PENALTY: u32 = 50;

/// Computes the score for a win.
///
/// Monotonically non-increasing in both `completion_time` and
/// `total_attempts`, with a floor of 0.
pub fn score(completion_time: u32, total_attempts: u32) -> u32 {
    let time_bonus = GameConfig::DEFAULT_TIME_BUDGET_SECS
        .saturating_sub(completion_time)
        .saturating_mul(TIME_BONUS_PER_SEC);
    let penalty = total_attempts.saturating_mul(ATTEMPT_PENALTY);

    BASE_SCORE.saturating_add(time_bonus).saturating_sub(penalty)
}
