// Garage: the user's budget, team, driver market and car upgrades.

use crate::domain::roster::{self, DriverProfile, GridRules, Team};
use crate::domain::upgrades::{self, Upgrade};
use crate::domain::{Competitor, RosterError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

/// Starting conditions for a garage.
#[derive(Debug, Clone)]
pub struct GarageSettings {
    pub starting_budget: u64,
    pub market_size: usize,
    pub team_name: String,
    pub team_color: String,
    pub grid: GridRules,
}

pub struct Garage {
    budget: u64,
    team: Team,
    market: Vec<DriverProfile>,
    // Purchase order; each catalog entry at most once.
    upgrades: Vec<&'static Upgrade>,
    rules: GridRules,
    rng: StdRng,
}

impl Garage {
    pub fn new(settings: GarageSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    pub fn with_rng(settings: GarageSettings, mut rng: StdRng) -> Self {
        let market = roster::generate_market(&mut rng, settings.market_size);
        Self {
            budget: settings.starting_budget,
            team: Team::new(settings.team_name, settings.team_color),
            market,
            upgrades: Vec::new(),
            rules: settings.grid,
            rng,
        }
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn market(&self) -> &[DriverProfile] {
        &self.market
    }

    pub fn max_team_drivers(&self) -> usize {
        self.rules.max_team_drivers
    }

    /// Moves a driver from the market onto the team and pays the salary.
    pub fn hire(&mut self, driver_id: &str) -> Result<&DriverProfile, RosterError> {
        if self.team.drivers.len() >= self.rules.max_team_drivers {
            return Err(RosterError::TeamFull {
                max_drivers: self.rules.max_team_drivers,
            });
        }
        let index = self
            .market
            .iter()
            .position(|d| d.id == driver_id)
            .ok_or(RosterError::DriverNotFound)?;
        let salary = self.market[index].salary;
        if self.budget < salary {
            return Err(RosterError::InsufficientFunds {
                cost: salary,
                budget: self.budget,
            });
        }

        let driver = self.market.remove(index);
        self.budget -= salary;
        info!(
            driver_id = %driver.id,
            salary,
            budget = self.budget,
            "driver hired"
        );
        self.team.drivers.push(driver);
        Ok(&self.team.drivers[self.team.drivers.len() - 1])
    }

    /// Drops a driver from the team. Salaries are not refunded.
    pub fn release(&mut self, driver_id: &str) -> Result<DriverProfile, RosterError> {
        let index = self
            .team
            .drivers
            .iter()
            .position(|d| d.id == driver_id)
            .ok_or(RosterError::DriverNotFound)?;
        let driver = self.team.drivers.remove(index);
        info!(driver_id = %driver.id, "driver released");
        Ok(driver)
    }

    pub fn purchased_upgrades(&self) -> &[&'static Upgrade] {
        &self.upgrades
    }

    pub fn is_purchased(&self, upgrade_id: &str) -> bool {
        self.upgrades.iter().any(|u| u.id == upgrade_id)
    }

    /// Total paid for upgrades so far.
    pub fn upgrades_spent(&self) -> u64 {
        self.upgrades.iter().map(|u| u.cost).sum()
    }

    /// Buys a catalog upgrade with the team budget.
    pub fn purchase_upgrade(
        &mut self,
        upgrade_id: &str,
    ) -> Result<&'static Upgrade, RosterError> {
        let upgrade = upgrades::find(upgrade_id).ok_or(RosterError::UpgradeNotFound)?;
        if self.is_purchased(upgrade.id) {
            return Err(RosterError::AlreadyPurchased);
        }
        if self.budget < upgrade.cost {
            return Err(RosterError::InsufficientFunds {
                cost: upgrade.cost,
                budget: self.budget,
            });
        }

        self.budget -= upgrade.cost;
        self.upgrades.push(upgrade);
        info!(
            upgrade_id = upgrade.id,
            cost = upgrade.cost,
            budget = self.budget,
            "upgrade purchased"
        );
        Ok(upgrade)
    }

    /// Assembles a fresh grid around the current team.
    pub fn build_grid(&mut self) -> Result<Vec<Competitor>, RosterError> {
        roster::build_grid(&mut self.rng, &self.team, self.rules)
    }
}
