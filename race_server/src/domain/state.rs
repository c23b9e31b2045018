// Domain-level race entities.

/// Upper bound for driver skill; larger values saturate.
pub const MAX_SKILL: u8 = 100;

/// A single car on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Competitor {
    // Identity (fixed once created).
    pub id: String,
    pub name: String,
    pub number: u32,

    // Race inputs, fixed for the duration of a race.
    pub skill: u8,
    pub team: String,
    pub color: String,

    // Progress state, owned by the race session.
    pub angle: f64, // radians into the current lap, 0.0..TAU
    pub laps: u32,
    pub position: u32, // 1-based rank, 0 before the first tick
}

impl Competitor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        number: u32,
        skill: u8,
        team: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number,
            skill: skill.min(MAX_SKILL),
            team: team.into(),
            color: color.into(),
            angle: 0.0,
            laps: 0,
            position: 0,
        }
    }

    pub fn is_finished(&self, lap_target: u32) -> bool {
        self.laps >= lap_target
    }

    /// Clears race progress, leaving identity and team data untouched.
    pub fn reset_progress(&mut self) {
        self.angle = 0.0;
        self.laps = 0;
        self.position = 0;
    }
}

/// Lifecycle of a race session as seen by readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceStatus {
    /// No competitors loaded yet.
    Empty,
    /// Grid loaded, no tick applied since the last load or reset.
    Ready,
    Running,
    Paused,
    /// Every competitor reached the lap target; results are published.
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_skill_exceeds_max_then_it_saturates() {
        let c = Competitor::new("a", "Alex Rossi", 7, 180, "My Team", "#ef4444");
        assert_eq!(c.skill, MAX_SKILL);
    }

    #[test]
    fn reset_progress_keeps_identity() {
        let mut c = Competitor::new("a", "Alex Rossi", 7, 80, "My Team", "#ef4444");
        c.angle = 1.5;
        c.laps = 2;
        c.position = 4;

        c.reset_progress();

        assert_eq!(c.angle, 0.0);
        assert_eq!(c.laps, 0);
        assert_eq!(c.position, 0);
        assert_eq!(c.name, "Alex Rossi");
        assert_eq!(c.skill, 80);
        assert_eq!(c.team, "My Team");
    }
}
