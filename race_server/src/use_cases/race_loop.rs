// Race loop: owns the session and drives ticks on a fixed interval.

use super::types::{CommandReply, RaceCommand, RaceUpdate};
use crate::domain::{Competitor, NoiseSource, RaceError, RaceSession, TickOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc, oneshot, watch};
use tracing::{debug, info, trace};

/// Configuration for spawning a race loop.
#[derive(Debug, Clone)]
pub struct RaceSettings {
    /// Capacity for inbound race commands.
    pub command_channel_capacity: usize,
    /// Capacity for broadcast race updates.
    pub update_broadcast_capacity: usize,
    /// Wall-clock time between ticks while running.
    pub tick_interval: Duration,
    /// Completed laps needed to finish.
    pub lap_target: u32,
}

/// Cloneable access to a running race loop.
#[derive(Clone)]
pub struct RaceHandle {
    command_tx: mpsc::Sender<RaceCommand>,
    /// Every published update, in order.
    update_tx: broadcast::Sender<RaceUpdate>,
    /// Latest published update for snapshot reads and lag recovery.
    latest_rx: watch::Receiver<RaceUpdate>,
    shutdown: Arc<Notify>,
}

impl RaceHandle {
    /// Spawns the race loop task on the current runtime.
    pub fn spawn(settings: RaceSettings, noise: Box<dyn NoiseSource>) -> Self {
        let session = RaceSession::new(settings.lap_target, noise);

        let (command_tx, command_rx) = mpsc::channel(settings.command_channel_capacity);
        let (update_tx, _update_rx) = broadcast::channel(settings.update_broadcast_capacity);
        let (latest_tx, latest_rx) = watch::channel(RaceUpdate::from(&session));
        let shutdown = Arc::new(Notify::new());

        tokio::spawn(race_task(
            session,
            command_rx,
            update_tx.clone(),
            latest_tx,
            settings.tick_interval,
            shutdown.clone(),
        ));

        Self {
            command_tx,
            update_tx,
            latest_rx,
            shutdown,
        }
    }

    /// Replaces the grid, stopping any race in progress.
    pub async fn load_grid(&self, grid: Vec<Competitor>) -> Result<(), RaceError> {
        self.request(|reply| RaceCommand::LoadGrid { grid, reply })
            .await
    }

    pub async fn start(&self) -> Result<(), RaceError> {
        self.request(|reply| RaceCommand::Start { reply }).await
    }

    /// Returns once the loop has stopped; no tick runs after this resolves.
    pub async fn pause(&self) -> Result<(), RaceError> {
        self.request(|reply| RaceCommand::Pause { reply }).await
    }

    pub async fn reset(&self) -> Result<(), RaceError> {
        self.request(|reply| RaceCommand::Reset { reply }).await
    }

    pub fn snapshot(&self) -> RaceUpdate {
        self.latest_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RaceUpdate> {
        self.update_tx.subscribe()
    }

    /// Stops the loop task. Later commands fail with `LoopClosed`.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    async fn request(
        &self,
        command: impl FnOnce(CommandReply) -> RaceCommand,
    ) -> Result<(), RaceError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RaceError::LoopClosed)?;
        reply_rx.await.map_err(|_| RaceError::LoopClosed)?
    }
}

pub async fn race_task(
    mut session: RaceSession,
    mut command_rx: mpsc::Receiver<RaceCommand>,
    update_tx: broadcast::Sender<RaceUpdate>,
    latest_tx: watch::Sender<RaceUpdate>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) {
    let mut interval = tokio::time::interval(tick_interval);

    loop {
        tokio::select! {
            // Commands win over a due tick so pause/reset apply before it.
            biased;

            _ = shutdown.notified() => {
                info!("race loop shutting down");
                break;
            }
            command = command_rx.recv() => {
                let Some(command) = command else {
                    debug!("race command channel closed; loop exiting");
                    break;
                };

                let was_running = session.is_running();
                let (result, reply) = apply_command(&mut session, command);
                if session.is_running() && !was_running {
                    // Fresh cadence on every (re)start; no backlog from the pause.
                    interval.reset();
                }

                publish(&session, &update_tx, &latest_tx);
                let _ = reply.send(result);
            }
            _ = interval.tick(), if session.is_running() => {
                let outcome = session.tick();
                trace!(tick = session.ticks(), ?outcome, "race tick");
                publish(&session, &update_tx, &latest_tx);

                if outcome == TickOutcome::Finished {
                    let winner = session.grid().first().map(|c| c.name.as_str()).unwrap_or("");
                    info!(ticks = session.ticks(), winner, "race finished");
                }
            }
        }
    }
}

fn apply_command(
    session: &mut RaceSession,
    command: RaceCommand,
) -> (Result<(), RaceError>, CommandReply) {
    match command {
        RaceCommand::LoadGrid { grid, reply } => {
            info!(grid_size = grid.len(), "grid loaded");
            session.load_grid(grid);
            (Ok(()), reply)
        }
        RaceCommand::Start { reply } => {
            let result = session.start();
            match &result {
                Ok(()) => info!(
                    grid_size = session.grid().len(),
                    lap_target = session.lap_target(),
                    "race started"
                ),
                Err(e) => info!(error = %e, "race start rejected"),
            }
            (result, reply)
        }
        RaceCommand::Pause { reply } => {
            session.pause();
            info!(tick = session.ticks(), "race paused");
            (Ok(()), reply)
        }
        RaceCommand::Reset { reply } => {
            session.reset();
            info!("race reset");
            (Ok(()), reply)
        }
    }
}

fn publish(
    session: &RaceSession,
    update_tx: &broadcast::Sender<RaceUpdate>,
    latest_tx: &watch::Sender<RaceUpdate>,
) {
    let update = RaceUpdate::from(session);
    latest_tx.send_replace(update.clone());
    // No subscribers is fine; readers can still use the watch snapshot.
    let _ = update_tx.send(update);
}
