use crate::use_cases::{Garage, RaceHandle};
use tokio::sync::Mutex;

pub struct AppState {
    // Commands into, and snapshots out of, the single race loop.
    pub race: RaceHandle,
    // Budget, team and market; only touched by request handlers.
    pub garage: Mutex<Garage>,
}
