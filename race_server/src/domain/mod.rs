// Domain layer: race simulation rules and roster building.

pub mod errors;
pub mod noise;
pub mod race;
pub mod roster;
pub mod state;
pub mod upgrades;

pub use errors::{RaceError, RosterError};
pub use noise::{FixedNoise, NoiseSource, SeededNoise, ThreadNoise, noise_from_seed};
pub use race::{RaceSession, TickOutcome};
pub use roster::{DriverProfile, GridRules, Team};
pub use state::{Competitor, RaceStatus};
pub use upgrades::{Upgrade, UpgradeCategory};
