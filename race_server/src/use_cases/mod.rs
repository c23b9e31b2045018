// Use cases layer: application workflows for the race server.

pub mod garage;
pub mod race_loop;
pub mod types;

pub use garage::{Garage, GarageSettings};
pub use race_loop::{RaceHandle, RaceSettings};
pub use types::{RaceCommand, RaceUpdate};
