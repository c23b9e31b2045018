// Driver market and grid assembly.

use super::errors::RosterError;
use super::state::Competitor;
use rand::Rng;
use rand::seq::SliceRandom;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Luca", "Jorge", "Emma", "Zoe", "Kai", "Maya", "Oskar", "Nico", "Ivy", "Liam",
    "Sofia", "Elias", "Hana", "Max", "Ravi", "Noah", "Mia",
];
const LAST_NAMES: &[&str] = &[
    "Moretti", "Kovacs", "Silva", "Nguyen", "Garcia", "Brown", "Dubois", "Ivanov", "Schmidt",
    "Rossi", "Lee", "Singh", "Olsen", "Park", "Mendez",
];
const MARKET_COLORS: &[&str] = &[
    "#ef4444", "#2563eb", "#10b981", "#f59e0b", "#8b5cf6", "#06b6d4", "#ec4899", "#374151",
];
const CPU_COLORS: &[&str] = &[
    "#2563eb", "#10b981", "#f59e0b", "#8b5cf6", "#06b6d4", "#ec4899", "#374151", "#0891b2",
];
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A driver on the market or on a team, before being placed on a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverProfile {
    pub id: String,
    pub name: String,
    pub number: u32,
    pub skill: u8,
    pub salary: u64,
    pub preferred_color: String,
}

impl DriverProfile {
    pub fn into_competitor(self, team: &str, color: &str) -> Competitor {
        Competitor::new(self.id, self.name, self.number, self.skill, team, color)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub name: String,
    pub color: String,
    pub drivers: Vec<DriverProfile>,
}

impl Team {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            drivers: Vec::new(),
        }
    }
}

/// Sizing rules for grid assembly.
#[derive(Debug, Clone, Copy)]
pub struct GridRules {
    /// Total cars on the grid, user drivers included.
    pub grid_size: usize,
    /// Drivers per team, for the user team and each CPU team.
    pub max_team_drivers: usize,
}

/// Short base-36 identifier.
pub fn driver_id<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect()
}

pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{first} {last}")
}

/// Generates `count` hireable drivers numbered from 1.
pub fn generate_market<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<DriverProfile> {
    (0..count)
        .map(|i| DriverProfile {
            id: driver_id(rng, 8),
            name: random_name(rng),
            number: i as u32 + 1,
            skill: rng.gen_range(50..=95),
            salary: rng.gen_range(80_000..=400_000),
            preferred_color: MARKET_COLORS[i % MARKET_COLORS.len()].to_string(),
        })
        .collect()
}

fn cpu_driver<R: Rng + ?Sized>(rng: &mut R) -> DriverProfile {
    DriverProfile {
        id: driver_id(rng, 6),
        name: random_name(rng),
        number: 200 + rng.gen_range(0..700),
        skill: rng.gen_range(45..=92),
        salary: 0,
        preferred_color: random_cpu_color(rng).to_string(),
    }
}

fn random_cpu_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CPU_COLORS[rng.gen_range(0..CPU_COLORS.len())]
}

/// Fills the grid around the user team with CPU teams and shuffles the
/// starting order. Positions are assigned 1..=N in the shuffled order.
pub fn build_grid<R: Rng + ?Sized>(
    rng: &mut R,
    team: &Team,
    rules: GridRules,
) -> Result<Vec<Competitor>, RosterError> {
    if team.drivers.is_empty() {
        return Err(RosterError::NoDrivers);
    }

    let per_team = rules.max_team_drivers.max(1);
    let cpu_needed = rules.grid_size.saturating_sub(team.drivers.len());
    let mut grid = Vec::with_capacity(cpu_needed + team.drivers.len());

    for team_index in 0..cpu_needed.div_ceil(per_team) {
        let team_name = format!("CPU Team {}", team_index + 1);
        let team_color = random_cpu_color(rng);
        let in_team = per_team.min(cpu_needed - team_index * per_team);
        for _ in 0..in_team {
            grid.push(cpu_driver(rng).into_competitor(&team_name, team_color));
        }
    }

    grid.extend(
        team.drivers
            .iter()
            .cloned()
            .map(|driver| driver.into_competitor(&team.name, &team.color)),
    );

    grid.shuffle(rng);
    for (index, competitor) in grid.iter_mut().enumerate() {
        competitor.position = index as u32 + 1;
    }
    Ok(grid)
}
