// Wire protocol DTOs and conversions for the presentation layer.

use crate::domain::{Competitor, DriverProfile, RaceStatus, Upgrade, UpgradeCategory};
use crate::use_cases::{Garage, RaceUpdate};
use serde::{Deserialize, Serialize};

/// Messages the server pushes to WebSocket subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    RaceUpdate(RaceUpdateDto),
}

#[derive(Debug, Clone, Serialize)]
pub struct RaceUpdateDto {
    pub tick: u64,
    pub status: RaceStatusDto,
    pub lap_target: u32,
    pub grid: Vec<CompetitorDto>,
    pub results: Option<Vec<CompetitorDto>>,
}

impl From<&RaceUpdate> for RaceUpdateDto {
    fn from(update: &RaceUpdate) -> Self {
        let lap_target = update.lap_target;
        let to_dtos = |competitors: &[Competitor]| {
            competitors
                .iter()
                .map(|c| CompetitorDto::new(c, lap_target))
                .collect::<Vec<_>>()
        };
        Self {
            tick: update.tick,
            status: update.status.into(),
            lap_target,
            grid: to_dtos(update.grid.as_slice()),
            results: update.results.as_deref().map(to_dtos),
        }
    }
}

/// Competitor as rendered on the track and leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct CompetitorDto {
    pub id: String,
    pub name: String,
    pub number: u32,
    pub skill: u8,
    pub team: String,
    pub color: String,
    pub angle: f64,
    pub laps: u32,
    pub position: u32,
    pub finished: bool,
}

impl CompetitorDto {
    fn new(c: &Competitor, lap_target: u32) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            number: c.number,
            skill: c.skill,
            team: c.team.clone(),
            color: c.color.clone(),
            angle: c.angle,
            laps: c.laps,
            position: c.position,
            finished: c.is_finished(lap_target),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceStatusDto {
    Empty,
    Ready,
    Running,
    Paused,
    Finished,
}

impl From<RaceStatus> for RaceStatusDto {
    fn from(status: RaceStatus) -> Self {
        match status {
            RaceStatus::Empty => RaceStatusDto::Empty,
            RaceStatus::Ready => RaceStatusDto::Ready,
            RaceStatus::Running => RaceStatusDto::Running,
            RaceStatus::Paused => RaceStatusDto::Paused,
            RaceStatus::Finished => RaceStatusDto::Finished,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverDto {
    pub id: String,
    pub name: String,
    pub number: u32,
    pub skill: u8,
    pub salary: u64,
    pub preferred_color: String,
}

impl From<&DriverProfile> for DriverDto {
    fn from(driver: &DriverProfile) -> Self {
        Self {
            id: driver.id.clone(),
            name: driver.name.clone(),
            number: driver.number,
            skill: driver.skill,
            salary: driver.salary,
            preferred_color: driver.preferred_color.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamDto {
    pub name: String,
    pub color: String,
    pub budget: u64,
    pub upgrades_spent: u64,
    pub max_drivers: usize,
    pub drivers: Vec<DriverDto>,
}

impl From<&Garage> for TeamDto {
    fn from(garage: &Garage) -> Self {
        let team = garage.team();
        Self {
            name: team.name.clone(),
            color: team.color.clone(),
            budget: garage.budget(),
            upgrades_spent: garage.upgrades_spent(),
            max_drivers: garage.max_team_drivers(),
            drivers: team.drivers.iter().map(DriverDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeCategoryDto {
    Engine,
    Aerodynamics,
    Safety,
    Electronics,
}

impl From<UpgradeCategory> for UpgradeCategoryDto {
    fn from(category: UpgradeCategory) -> Self {
        match category {
            UpgradeCategory::Engine => UpgradeCategoryDto::Engine,
            UpgradeCategory::Aerodynamics => UpgradeCategoryDto::Aerodynamics,
            UpgradeCategory::Safety => UpgradeCategoryDto::Safety,
            UpgradeCategory::Electronics => UpgradeCategoryDto::Electronics,
        }
    }
}

/// Catalog entry as listed to the user, with ownership.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u64,
    pub category: UpgradeCategoryDto,
    pub benefit: String,
    pub purchased: bool,
}

impl UpgradeDto {
    pub fn new(upgrade: &Upgrade, purchased: bool) -> Self {
        Self {
            id: upgrade.id.to_string(),
            name: upgrade.name.to_string(),
            description: upgrade.description.to_string(),
            cost: upgrade.cost,
            category: upgrade.category.into(),
            benefit: upgrade.benefit.to_string(),
            purchased,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpgradeRequest {
    pub upgrade_id: String,
}

/// Body for hire and release requests.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverRequest {
    pub driver_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridResponse {
    pub grid_size: usize,
    pub race: RaceUpdateDto,
}
