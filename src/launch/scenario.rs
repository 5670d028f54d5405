use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::dynamics::state::SimConfig;
use crate::error::{Result, SimError};
use super::config::LaunchConfig;

// ---------------------------------------------------------------------------
// Scenario files: a launch plus headless run settings, in YAML
//
//   launch:
//     initial_height: 0.0        # m (optional, default 0)
//     launch_angle_degrees: 45.0
//     launch_speed: 9.0          # m/s
//     gravity: -9.81             # m/s^2 (optional, default -9.81)
//
//   sim:                         # optional
//     dt: 0.01                   # s
//     max_time: 30.0             # s
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Scenario {
    pub launch: LaunchConfig,
    #[serde(default)]
    pub sim: SimConfig,
}

impl Scenario {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| SimError::config("scenario", e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            SimError::config("scenario", format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_scenario() {
        let s = Scenario::from_yaml_str(
            "launch:\n  initial_height: 2.0\n  launch_angle_degrees: 30.0\n  launch_speed: 15.0\n  gravity: -1.62\nsim:\n  dt: 0.05\n  max_time: 20.0\n",
        )
        .unwrap();
        assert_eq!(s.launch.initial_height(), 2.0);
        assert_eq!(s.launch.gravity(), -1.62);
        assert_eq!(s.sim.dt, 0.05);
        assert_eq!(s.sim.max_time, 20.0);
    }

    #[test]
    fn optional_fields_take_defaults() {
        let s = Scenario::from_yaml_str("launch:\n  launch_angle_degrees: 45\n  launch_speed: 9\n").unwrap();
        assert_eq!(s.launch, LaunchConfig::default());
        assert_eq!(s.sim, SimConfig::default());
    }

    #[test]
    fn invalid_launch_is_a_configuration_error() {
        let err = Scenario::from_yaml_str("launch:\n  launch_angle_degrees: 45\n  launch_speed: -3\n")
            .unwrap_err();
        assert_eq!(err.stage(), "configuration");
        assert!(err.to_string().contains("launch_speed"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Scenario::load("/nonexistent/scenario.yaml").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
