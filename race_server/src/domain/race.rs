// Race session: the authoritative grid and its per-tick state transition.

use super::errors::RaceError;
use super::noise::NoiseSource;
use super::state::{Competitor, MAX_SKILL, RaceStatus};
use std::cmp::Ordering;
use std::f64::consts::TAU;

/// Angular progress per tick for a skill-100 driver before noise.
pub const BASE_PROGRESS_RATE: f64 = 0.015;
/// Half-width of the uniform noise added to every progress step.
pub const NOISE_HALF_WIDTH: f64 = 0.005;

/// What a call to [`RaceSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to simulate (empty grid or results already published).
    Idle,
    Advanced,
    /// This tick moved the last competitor over the line.
    Finished,
}

pub struct RaceSession {
    grid: Vec<Competitor>,
    running: bool,
    // Set by the first start; cleared by reset and grid loads.
    started: bool,
    results: Option<Vec<Competitor>>,
    lap_target: u32,
    // Ticks applied since the last grid load or reset.
    ticks: u64,
    noise: Box<dyn NoiseSource>,
}

impl RaceSession {
    pub fn new(lap_target: u32, noise: Box<dyn NoiseSource>) -> Self {
        Self {
            grid: Vec::new(),
            running: false,
            started: false,
            results: None,
            lap_target,
            ticks: 0,
            noise,
        }
    }

    /// Replaces the grid. Any running race is stopped and results are cleared.
    pub fn load_grid(&mut self, grid: Vec<Competitor>) {
        self.grid = grid;
        self.running = false;
        self.started = false;
        self.results = None;
        self.ticks = 0;
    }

    pub fn start(&mut self) -> Result<(), RaceError> {
        if self.grid.is_empty() {
            return Err(RaceError::EmptyGrid);
        }
        if self.results.is_some() {
            return Err(RaceError::AlreadyFinished);
        }
        self.running = true;
        self.started = true;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.started = false;
        self.results = None;
        self.ticks = 0;
        for competitor in &mut self.grid {
            competitor.reset_progress();
        }
    }

    /// Advances every unfinished competitor, re-ranks the grid and publishes
    /// results once everyone has reached the lap target.
    pub fn tick(&mut self) -> TickOutcome {
        if self.grid.is_empty() || self.results.is_some() {
            return TickOutcome::Idle;
        }

        let lap_target = self.lap_target;
        for competitor in self.grid.iter_mut() {
            if competitor.is_finished(lap_target) {
                continue;
            }
            let noise = self.noise.sample(NOISE_HALF_WIDTH);
            advance(competitor, progress_increment(competitor.skill, noise));
        }

        // Stable: exact ties keep their previous relative order.
        self.grid.sort_by(|a, b| {
            b.laps
                .cmp(&a.laps)
                .then_with(|| b.angle.partial_cmp(&a.angle).unwrap_or(Ordering::Equal))
        });
        for (index, competitor) in self.grid.iter_mut().enumerate() {
            competitor.position = index as u32 + 1;
        }
        self.ticks += 1;

        if self.grid.iter().all(|c| c.is_finished(lap_target)) {
            self.running = false;
            self.results = Some(self.grid.clone());
            return TickOutcome::Finished;
        }
        TickOutcome::Advanced
    }

    pub fn grid(&self) -> &[Competitor] {
        &self.grid
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn results(&self) -> Option<&[Competitor]> {
        self.results.as_deref()
    }

    pub fn lap_target(&self) -> u32 {
        self.lap_target
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn status(&self) -> RaceStatus {
        if self.results.is_some() {
            RaceStatus::Finished
        } else if self.running {
            RaceStatus::Running
        } else if self.grid.is_empty() {
            RaceStatus::Empty
        } else if self.started {
            RaceStatus::Paused
        } else {
            RaceStatus::Ready
        }
    }
}

/// Angular progress for one tick. Noise is clamped to the configured
/// half-width so a step always stays well below one lap.
pub fn progress_increment(skill: u8, noise: f64) -> f64 {
    let noise = if noise.is_finite() {
        noise.clamp(-NOISE_HALF_WIDTH, NOISE_HALF_WIDTH)
    } else {
        0.0
    };
    f64::from(skill.min(MAX_SKILL)) / 100.0 * BASE_PROGRESS_RATE + noise
}

fn advance(competitor: &mut Competitor, increment: f64) {
    // Negative steps stall the car instead of running it backwards.
    let mut angle = competitor.angle + increment.max(0.0);
    if angle >= TAU {
        competitor.laps += 1;
        angle -= TAU;
    }
    competitor.angle = angle;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::noise::{FixedNoise, SeededNoise};

    fn competitor(id: &str, skill: u8) -> Competitor {
        Competitor::new(id, format!("Driver {id}"), 1, skill, "CPU Team 1", "#2563eb")
    }

    fn session(lap_target: u32, noise: f64, skills: &[u8]) -> RaceSession {
        let mut session = RaceSession::new(lap_target, Box::new(FixedNoise(noise)));
        session.load_grid(
            skills
                .iter()
                .enumerate()
                .map(|(i, skill)| competitor(&i.to_string(), *skill))
                .collect(),
        );
        session
    }

    fn find<'a>(session: &'a RaceSession, id: &str) -> &'a Competitor {
        session
            .grid()
            .iter()
            .find(|c| c.id == id)
            .expect("competitor should be on the grid")
    }

    fn assert_grid_invariants(session: &RaceSession) {
        let grid = session.grid();
        for (index, c) in grid.iter().enumerate() {
            assert!((0.0..TAU).contains(&c.angle), "angle out of range: {}", c.angle);
            assert_eq!(c.position, index as u32 + 1);
        }
        for pair in grid.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.laps > b.laps || (a.laps == b.laps && a.angle >= b.angle));
        }
    }

    #[test]
    fn when_grid_is_empty_then_start_is_rejected() {
        let mut session = RaceSession::new(3, Box::new(FixedNoise(0.0)));

        assert_eq!(session.start(), Err(RaceError::EmptyGrid));
        assert!(!session.is_running());
        assert_eq!(session.status(), RaceStatus::Empty);
    }

    #[test]
    fn start_is_idempotent_and_pause_stops() {
        let mut session = session(3, 0.0, &[80]);

        assert_eq!(session.start(), Ok(()));
        assert_eq!(session.start(), Ok(()));
        assert_eq!(session.status(), RaceStatus::Running);

        session.pause();
        session.pause();
        assert!(!session.is_running());
    }

    #[test]
    fn when_empty_grid_ticks_then_nothing_happens() {
        let mut session = RaceSession::new(3, Box::new(FixedNoise(0.0)));
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.ticks(), 0);
    }

    #[test]
    fn tick_adds_skill_scaled_progress() {
        let mut session = session(3, 0.002, &[100, 50]);

        session.tick();

        assert!((find(&session, "0").angle - 0.017).abs() < 1e-12);
        assert!((find(&session, "1").angle - 0.0095).abs() < 1e-12);
    }

    #[test]
    fn when_angle_crosses_full_circle_then_lap_completes_and_angle_wraps() {
        let mut session = session(3, 0.0, &[100]);
        session.grid[0].angle = TAU - 0.01;

        session.tick();

        let c = find(&session, "0");
        assert_eq!(c.laps, 1);
        assert!((c.angle - 0.005).abs() < 1e-9);
    }

    #[test]
    fn grid_is_ranked_by_laps_then_angle() {
        let mut session = session(5, 0.0, &[0, 0, 0, 0]);
        session.grid[0].laps = 1;
        session.grid[0].angle = 0.1;
        session.grid[1].laps = 2;
        session.grid[1].angle = 0.0;
        session.grid[2].laps = 1;
        session.grid[2].angle = 3.0;

        session.tick();

        let order: Vec<&str> = session.grid().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["1", "2", "0", "3"]);
        assert_grid_invariants(&session);
    }

    #[test]
    fn exact_ties_keep_their_relative_order() {
        let mut session = session(3, 0.0, &[40, 40, 40]);

        session.tick();

        let order: Vec<&str> = session.grid().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["0", "1", "2"]);
    }

    #[test]
    fn finished_competitors_are_left_untouched() {
        let mut session = session(1, 0.0, &[100, 100]);
        session.grid[0].laps = 1;
        session.grid[0].angle = 0.3;

        for _ in 0..10 {
            session.tick();
        }

        let done = find(&session, "0");
        assert_eq!(done.laps, 1);
        assert_eq!(done.angle, 0.3);
    }

    #[test]
    fn when_noise_exceeds_half_width_then_it_is_clamped() {
        let mut session = session(3, 10.0, &[0]);

        session.tick();

        assert!((find(&session, "0").angle - NOISE_HALF_WIDTH).abs() < 1e-12);
    }

    #[test]
    fn when_step_is_negative_then_competitor_stalls() {
        let mut session = session(3, -NOISE_HALF_WIDTH, &[20]);
        session.grid[0].angle = 1.0;

        for _ in 0..5 {
            session.tick();
        }

        let c = find(&session, "0");
        assert_eq!(c.angle, 1.0);
        assert_eq!(c.laps, 0);
    }

    #[test]
    fn skill_100_driver_needs_419_ticks_per_lap_without_noise() {
        let mut session = session(1, 0.0, &[100]);
        session.start().expect("grid is loaded");

        let mut ticks = 0;
        while session.is_running() {
            session.tick();
            ticks += 1;
        }

        assert_eq!(ticks, 419);
        assert_eq!(session.status(), RaceStatus::Finished);
    }

    #[test]
    fn race_terminates_with_monotonic_progress_and_results_published_once() {
        let mut session = RaceSession::new(2, Box::new(SeededNoise::new(7)));
        session.load_grid(
            [95, 80, 62, 45, 30]
                .iter()
                .enumerate()
                .map(|(i, skill)| competitor(&i.to_string(), *skill))
                .collect(),
        );
        session.start().expect("grid is loaded");

        let mut finished_events = 0;
        let mut guard = 0;
        while session.is_running() {
            let before: Vec<(String, u32, f64)> = session
                .grid()
                .iter()
                .map(|c| (c.id.clone(), c.laps, c.angle))
                .collect();

            if session.tick() == TickOutcome::Finished {
                finished_events += 1;
            }
            assert_grid_invariants(&session);

            for (id, laps, angle) in before {
                let after = find(&session, &id);
                if laps >= 2 {
                    assert_eq!((after.laps, after.angle), (laps, angle));
                } else {
                    assert!(after.laps > laps || (after.laps == laps && after.angle >= angle));
                }
            }

            guard += 1;
            assert!(guard < 100_000, "race did not terminate");
        }

        assert_eq!(finished_events, 1);
        let results = session.results().expect("results should be published");
        assert_eq!(results, session.grid());
        assert!(results.iter().all(|c| c.laps >= 2));

        // Ticks after completion leave everything alone.
        let frozen = session.grid().to_vec();
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.grid(), frozen.as_slice());
        assert_eq!(session.start(), Err(RaceError::AlreadyFinished));
    }

    #[test]
    fn strongest_driver_leads_once_it_completes_the_lap() {
        let mut session = RaceSession::new(1, Box::new(SeededNoise::new(11)));
        session.load_grid(vec![competitor("slow", 0), competitor("fast", 100)]);
        session.start().expect("grid is loaded");

        let mut guard = 0;
        while find(&session, "fast").laps < 1 {
            session.tick();
            guard += 1;
            assert!(guard < 1_000);
        }

        assert_eq!(find(&session, "fast").position, 1);
        assert_eq!(find(&session, "slow").position, 2);
    }

    #[test]
    fn reset_clears_progress_and_results_and_is_idempotent() {
        let mut session = session(1, 0.0, &[100, 90]);
        session.start().expect("grid is loaded");
        while session.is_running() {
            session.tick();
        }
        assert!(session.results().is_some());
        let order: Vec<String> = session.grid().iter().map(|c| c.id.clone()).collect();

        session.reset();
        let once = session.grid().to_vec();
        session.reset();

        assert_eq!(session.grid(), once.as_slice());
        assert!(session.results().is_none());
        assert!(!session.is_running());
        assert_eq!(session.status(), RaceStatus::Ready);
        for (c, id) in session.grid().iter().zip(order) {
            assert_eq!(c.id, id);
            assert_eq!((c.laps, c.angle, c.position), (0, 0.0, 0));
        }
    }

    #[test]
    fn when_paused_before_first_tick_then_status_is_paused() {
        let mut session = session(3, 0.0, &[70, 80]);
        assert_eq!(session.status(), RaceStatus::Ready);

        session.start().expect("grid is loaded");
        session.pause();

        assert_eq!(session.ticks(), 0);
        assert_eq!(session.status(), RaceStatus::Paused);

        session.reset();
        assert_eq!(session.status(), RaceStatus::Ready);
    }

    #[test]
    fn loading_a_grid_stops_the_race_and_clears_results() {
        let mut session = session(3, 0.0, &[70]);
        session.start().expect("grid is loaded");
        session.tick();

        session.load_grid(vec![competitor("x", 50)]);

        assert!(!session.is_running());
        assert_eq!(session.ticks(), 0);
        assert_eq!(session.status(), RaceStatus::Ready);
    }
}
