pub mod state;

use nalgebra::Vector2;

use crate::launch::LaunchConfig;

pub use state::{Phase, SimConfig, SimulationState, Trajectory, STANDARD_GRAVITY, UNIT_MASS};

// ---------------------------------------------------------------------------
// Equations of motion (2D point mass, constant gravity, no drag)
// ---------------------------------------------------------------------------

/// Acceleration acting on the projectile: gravity only, straight down.
pub fn acceleration(config: &LaunchConfig) -> Vector2<f64> {
    Vector2::new(0.0, config.gravity())
}
