/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameConfig {
    /// Countdown budget for a full playthrough, in seconds.
    ///
    /// This is the single authoritative budget: the session clock starts
    /// here and the scoring bonus is measured against it.
    pub time_budget_secs: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Number of sequential rooms in a playthrough.
    pub const ROOM_COUNT: usize = 5;
    /// First room of a fresh session. Rooms are numbered 1..=ROOM_COUNT.
    pub const FIRST_ROOM: u8 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TIME_BUDGET_SECS: u32 = 300;

    pub fn new() -> Self {
        Self {
            time_budget_secs: Self::DEFAULT_TIME_BUDGET_SECS,
        }
    }

    pub fn with_time_budget(time_budget_secs: u32) -> Self {
        Self { time_budget_secs }
    }

    pub const fn last_room(&self) -> u8 {
        Self::ROOM_COUNT as u8
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
