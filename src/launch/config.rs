use nalgebra::Vector2;
use serde::Deserialize;

use crate::dynamics::state::{SimulationState, STANDARD_GRAVITY};
use crate::error::{Result, SimError};

// ---------------------------------------------------------------------------
// Launch configuration
// ---------------------------------------------------------------------------

/// Launch parameters, validated once and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawLaunchConfig")]
pub struct LaunchConfig {
    initial_height: f64,        // m
    launch_angle_degrees: f64,  // deg above horizontal
    launch_speed: f64,          // m/s
    gravity: f64,               // m/s^2, negative = downward
}

impl LaunchConfig {
    pub fn new(
        initial_height: f64,
        launch_angle_degrees: f64,
        launch_speed: f64,
        gravity: f64,
    ) -> Result<Self> {
        finite("initial_height", initial_height)?;
        finite("launch_angle_degrees", launch_angle_degrees)?;
        finite("launch_speed", launch_speed)?;
        finite("gravity", gravity)?;
        if initial_height < 0.0 {
            return Err(SimError::config(
                "initial_height",
                format!("must not be below ground, got {initial_height}"),
            ));
        }
        if launch_speed < 0.0 {
            return Err(SimError::config(
                "launch_speed",
                format!("must not be negative, got {launch_speed}"),
            ));
        }
        if gravity >= 0.0 {
            return Err(SimError::config(
                "gravity",
                format!("must point downward (negative), got {gravity}"),
            ));
        }
        Ok(Self { initial_height, launch_angle_degrees, launch_speed, gravity })
    }

    pub fn initial_height(&self) -> f64 {
        self.initial_height
    }

    pub fn launch_angle_degrees(&self) -> f64 {
        self.launch_angle_degrees
    }

    pub fn launch_speed(&self) -> f64 {
        self.launch_speed
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Initial velocity [speed·cos θ, speed·sin θ].
    pub fn initial_velocity(&self) -> Vector2<f64> {
        let theta = self.launch_angle_degrees.to_radians();
        Vector2::new(
            self.launch_speed * theta.cos(),
            self.launch_speed * theta.sin(),
        )
    }

    pub fn initial_vx(&self) -> f64 {
        self.initial_velocity().x
    }

    pub fn initial_vy(&self) -> f64 {
        self.initial_velocity().y
    }

    /// State at t = 0: on the launch axis at the configured height.
    pub fn initial_state(&self) -> SimulationState {
        SimulationState {
            time: 0.0,
            pos: Vector2::new(0.0, self.initial_height),
            vel: self.initial_velocity(),
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            initial_height: 0.0,
            launch_angle_degrees: 45.0,
            launch_speed: 9.0,
            gravity: STANDARD_GRAVITY,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::config(field, format!("must be a finite number, got {value}")))
    }
}

// ---------------------------------------------------------------------------
// Serde shim: deserialize into the raw shape, then validate
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLaunchConfig {
    #[serde(default)]
    initial_height: f64,
    launch_angle_degrees: f64,
    launch_speed: f64,
    #[serde(default = "default_gravity")]
    gravity: f64,
}

fn default_gravity() -> f64 {
    STANDARD_GRAVITY
}

impl TryFrom<RawLaunchConfig> for LaunchConfig {
    type Error = SimError;

    fn try_from(raw: RawLaunchConfig) -> Result<Self> {
        LaunchConfig::new(
            raw.initial_height,
            raw.launch_angle_degrees,
            raw.launch_speed,
            raw.gravity,
        )
    }
}

// ---------------------------------------------------------------------------
// Launch builder
// ---------------------------------------------------------------------------

pub struct LaunchConfigBuilder {
    initial_height: f64,
    launch_angle_degrees: f64,
    launch_speed: f64,
    gravity: f64,
}

impl LaunchConfigBuilder {
    pub fn new() -> Self {
        let d = LaunchConfig::default();
        Self {
            initial_height: d.initial_height,
            launch_angle_degrees: d.launch_angle_degrees,
            launch_speed: d.launch_speed,
            gravity: d.gravity,
        }
    }

    pub fn initial_height(mut self, v: f64) -> Self { self.initial_height = v; self }
    pub fn angle_degrees(mut self, v: f64) -> Self { self.launch_angle_degrees = v; self }
    pub fn speed(mut self, v: f64) -> Self { self.launch_speed = v; self }
    pub fn gravity(mut self, v: f64) -> Self { self.gravity = v; self }

    pub fn build(self) -> Result<LaunchConfig> {
        LaunchConfig::new(
            self.initial_height,
            self.launch_angle_degrees,
            self.launch_speed,
            self.gravity,
        )
    }
}

impl Default for LaunchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<LaunchConfig> for LaunchConfigBuilder {
    fn from(c: LaunchConfig) -> Self {
        Self {
            initial_height: c.initial_height,
            launch_angle_degrees: c.launch_angle_degrees,
            launch_speed: c.launch_speed,
            gravity: c.gravity,
        }
    }
}

// ---------------------------------------------------------------------------
// Preset launches
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// 9 m/s at 45° from the ground.
    pub fn lob() -> LaunchConfig {
        LaunchConfig::default()
    }

    /// Horizontal throw from a 10 m ledge.
    pub fn ledge() -> LaunchConfig {
        LaunchConfig {
            initial_height: 10.0,
            launch_angle_degrees: 0.0,
            launch_speed: 5.0,
            gravity: STANDARD_GRAVITY,
        }
    }

    /// Straight up at 12 m/s.
    pub fn vertical() -> LaunchConfig {
        LaunchConfig {
            initial_height: 0.0,
            launch_angle_degrees: 90.0,
            launch_speed: 12.0,
            gravity: STANDARD_GRAVITY,
        }
    }

    /// Dropped from 5 m with no initial velocity.
    pub fn drop() -> LaunchConfig {
        LaunchConfig {
            initial_height: 5.0,
            launch_angle_degrees: 0.0,
            launch_speed: 0.0,
            gravity: STANDARD_GRAVITY,
        }
    }

    pub fn by_name(name: &str) -> Option<LaunchConfig> {
        match name {
            "lob" => Some(lob()),
            "ledge" => Some(ledge()),
            "vertical" => Some(vertical()),
            "drop" => Some(drop()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forty_five_degree_components() {
        let c = LaunchConfig::new(0.0, 45.0, 9.0, -9.81).unwrap();
        assert!((c.initial_vx() - 6.3640).abs() < 1e-3);
        assert!((c.initial_vy() - 6.3640).abs() < 1e-3);
        assert!((c.initial_vx() - c.initial_vy()).abs() < 1e-12);
    }

    #[test]
    fn angle_is_in_degrees() {
        let c = LaunchConfig::new(0.0, 90.0, 10.0, -9.81).unwrap();
        assert!(c.initial_vx().abs() < 1e-12);
        assert!((c.initial_vy() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn initial_state_starts_at_height() {
        let c = presets::ledge();
        let s = c.initial_state();
        assert_eq!(s.time, 0.0);
        assert_eq!(s.pos, Vector2::new(0.0, 10.0));
        assert!((s.vel.x - 5.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_nan_and_negative_speed() {
        assert!(LaunchConfig::new(0.0, 45.0, f64::NAN, -9.81).is_err());
        assert!(LaunchConfig::new(0.0, 45.0, -1.0, -9.81).is_err());
        assert!(LaunchConfig::new(0.0, f64::INFINITY, 5.0, -9.81).is_err());
    }

    #[test]
    fn rejects_upward_gravity_and_negative_height() {
        let err = LaunchConfig::new(0.0, 45.0, 5.0, 9.81).unwrap_err();
        assert_eq!(err.stage(), "configuration");
        assert!(LaunchConfig::new(-2.0, 45.0, 5.0, -9.81).is_err());
    }

    #[test]
    fn builder_overrides_defaults() {
        let c = LaunchConfigBuilder::new().speed(20.0).angle_degrees(30.0).build().unwrap();
        assert_eq!(c.launch_speed(), 20.0);
        assert_eq!(c.launch_angle_degrees(), 30.0);
        assert_eq!(c.gravity(), STANDARD_GRAVITY);
        assert_eq!(c.initial_height(), 0.0);
    }

    #[test]
    fn preset_lookup() {
        assert_eq!(presets::by_name("vertical"), Some(presets::vertical()));
        assert!(presets::by_name("cannon").is_none());
    }
}
