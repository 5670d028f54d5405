use nalgebra::Vector2;
use serde::Deserialize;

use crate::error::{Result, SimError};

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const STANDARD_GRAVITY: f64 = -9.81; // m/s^2, negative = downward
pub const UNIT_MASS: f64 = 1.0;          // kg, no mass modeling

// ---------------------------------------------------------------------------
// Flight phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Airborne,
    /// Terminal: no bounce, no re-entry into flight.
    Grounded,
}

// ---------------------------------------------------------------------------
// 2D point-mass state
// ---------------------------------------------------------------------------

/// Kinematic state at one instant.
/// Frame: x downrange, y up, origin at the launch point on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub time: f64,              // s
    pub pos: Vector2<f64>,      // m   [x, y]
    pub vel: Vector2<f64>,      // m/s [vx, vy]
}

impl SimulationState {
    pub fn new(time: f64, x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self {
            time,
            pos: Vector2::new(x, y),
            vel: Vector2::new(vx, vy),
        }
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn vx(&self) -> f64 {
        self.vel.x
    }

    pub fn vy(&self) -> f64 {
        self.vel.y
    }

    /// A state resting on the ground with zero velocity is grounded.
    /// Only the zero launch state and ground-contact steps produce one.
    pub fn phase(&self) -> Phase {
        if self.pos.y <= 0.0 && self.vel.x == 0.0 && self.vel.y == 0.0 {
            Phase::Grounded
        } else {
            Phase::Airborne
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.phase() == Phase::Grounded
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }
}

pub type Trajectory = Vec<SimulationState>;

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

/// Headless run settings. Real-time drivers supply their own frame deltas.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dt: f64,
    pub max_time: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,   // one display frame at 60 Hz
            max_time: 60.0,   // hard stop for launches that never land
        }
    }
}

impl SimConfig {
    /// Reject settings a headless run cannot use. Check before opening any output.
    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::Integration { dt: self.dt });
        }
        if !self.max_time.is_finite() || self.max_time <= 0.0 {
            return Err(SimError::config(
                "max_time",
                format!("must be positive and finite, got {}", self.max_time),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_is_grounded() {
        let s = SimulationState::new(0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(s.phase(), Phase::Grounded);
    }

    #[test]
    fn ground_level_launch_is_airborne() {
        let s = SimulationState::new(0.0, 0.0, 0.0, 6.0, 6.0);
        assert_eq!(s.phase(), Phase::Airborne);
    }

    #[test]
    fn momentary_rest_above_ground_is_airborne() {
        // Vertical throw at the apex
        let s = SimulationState::new(1.0, 0.0, 4.0, 0.0, 0.0);
        assert!(!s.is_grounded());
    }

    #[test]
    fn sim_config_rejects_unusable_steps() {
        assert!(SimConfig::default().validate().is_ok());
        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let err = SimConfig { dt, max_time: 5.0 }.validate().unwrap_err();
            assert_eq!(err.stage(), "integration");
        }
        let err = SimConfig { dt: 0.1, max_time: 0.0 }.validate().unwrap_err();
        assert_eq!(err.stage(), "configuration");
    }
}
