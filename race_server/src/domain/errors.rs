// Domain-level errors for race and roster workflows.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceError {
    /// Start was requested before any competitor was loaded.
    EmptyGrid,
    /// Start was requested after results were published; reset first.
    AlreadyFinished,
    /// The race loop task is no longer accepting commands.
    LoopClosed,
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceError::EmptyGrid => f.write_str("build the grid first"),
            RaceError::AlreadyFinished => f.write_str("race already finished; reset it first"),
            RaceError::LoopClosed => f.write_str("race loop unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    TeamFull { max_drivers: usize },
    InsufficientFunds { cost: u64, budget: u64 },
    DriverNotFound,
    NoDrivers,
    UpgradeNotFound,
    AlreadyPurchased,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::TeamFull { max_drivers } => {
                write!(f, "you can only hire {max_drivers} drivers")
            }
            RosterError::InsufficientFunds { .. } => {
                f.write_str("not enough money for this purchase")
            }
            RosterError::DriverNotFound => f.write_str("driver not found"),
            RosterError::NoDrivers => {
                f.write_str("hire at least one driver to build a grid")
            }
            RosterError::UpgradeNotFound => f.write_str("upgrade not found"),
            RosterError::AlreadyPurchased => f.write_str("upgrade already purchased"),
        }
    }
}
