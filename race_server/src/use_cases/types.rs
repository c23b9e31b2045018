// Use-case level inputs/outputs for the race loop.

use crate::domain::{Competitor, RaceError, RaceSession, RaceStatus};
use tokio::sync::oneshot;

pub type CommandReply = oneshot::Sender<Result<(), RaceError>>;

#[derive(Debug)]
pub enum RaceCommand {
    LoadGrid {
        grid: Vec<Competitor>,
        reply: CommandReply,
    },
    Start { reply: CommandReply },
    Pause { reply: CommandReply },
    Reset { reply: CommandReply },
}

/// Consistent view of the session taken between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceUpdate {
    pub tick: u64,
    pub status: RaceStatus,
    pub lap_target: u32,
    pub grid: Vec<Competitor>,
    pub results: Option<Vec<Competitor>>,
}

impl From<&RaceSession> for RaceUpdate {
    fn from(session: &RaceSession) -> Self {
        Self {
            tick: session.ticks(),
            status: session.status(),
            lap_target: session.lap_target(),
            grid: session.grid().to_vec(),
            results: session.results().map(<[Competitor]>::to_vec),
        }
    }
}
