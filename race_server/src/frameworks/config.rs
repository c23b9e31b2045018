use std::{env, time::Duration};

// Runtime/server constants (race rules live in the settings built from these).

pub fn http_port() -> u16 {
    env::var("RACE_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3005)
}

pub fn lap_target() -> u32 {
    env::var("RACE_LAP_TARGET")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3)
}

pub fn tick_interval() -> Duration {
    let millis = env::var("RACE_TICK_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .unwrap_or(100);
    Duration::from_millis(millis)
}

// Unset means entropy-seeded noise.
pub fn race_seed() -> Option<u64> {
    env::var("RACE_SEED").ok().and_then(|v| v.parse().ok())
}

pub const COMMAND_CHANNEL_CAPACITY: usize = 64;
pub const UPDATE_BROADCAST_CAPACITY: usize = 128;

pub const GRID_SIZE: usize = 22;
pub const MAX_TEAM_DRIVERS: usize = 2;
pub const STARTING_BUDGET: u64 = 1_000_000;
pub const MARKET_SIZE: usize = 20;
pub const TEAM_NAME: &str = "My Team";
pub const TEAM_COLOR: &str = "#ef4444";
