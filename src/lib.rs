pub mod analysis;
pub mod cli;
pub mod dynamics;
pub mod error;
pub mod io;
pub mod launch;
pub mod render;
pub mod sim;

pub use error::{DataErrorKind, Result, SimError};

pub mod types {
    pub use crate::dynamics::state::{Phase, SimConfig, SimulationState, Trajectory, STANDARD_GRAVITY, UNIT_MASS};
    pub use crate::launch::{LaunchConfig, Scenario};
}
