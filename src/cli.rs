use std::path::PathBuf;

use clap::Args;

use crate::dynamics::state::SimConfig;
use crate::error::{Result, SimError};
use crate::launch::{presets, LaunchConfigBuilder, Scenario};

// ---------------------------------------------------------------------------
// Launch flags shared by the command-line tools
// ---------------------------------------------------------------------------

/// Launch selection: scenario file or preset as the base, single flags on top.
#[derive(Args, Debug, Clone, Default)]
pub struct LaunchArgs {
    /// YAML scenario file
    #[arg(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Named launch (lob, ledge, vertical, drop)
    #[arg(long)]
    pub preset: Option<String>,

    /// Initial height (m)
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<f64>,

    /// Launch angle above horizontal (degrees)
    #[arg(short = 'a', long, allow_hyphen_values = true)]
    pub angle: Option<f64>,

    /// Launch speed (m/s)
    #[arg(short = 'v', long, allow_hyphen_values = true)]
    pub speed: Option<f64>,

    /// Gravity (m/s^2, negative = downward)
    #[arg(long, allow_hyphen_values = true)]
    pub gravity: Option<f64>,

    /// Integration time step (s)
    #[arg(long)]
    pub dt: Option<f64>,

    /// Stop after this much simulated time (s)
    #[arg(long)]
    pub max_time: Option<f64>,
}

impl LaunchArgs {
    pub fn resolve(&self) -> Result<Scenario> {
        let base = match (&self.scenario, &self.preset) {
            (Some(path), _) => Scenario::load(path)?,
            (None, Some(name)) => {
                let launch = presets::by_name(name).ok_or_else(|| {
                    SimError::config("preset", format!("unknown preset '{name}'"))
                })?;
                Scenario { launch, sim: SimConfig::default() }
            }
            (None, None) => Scenario { launch: Default::default(), sim: SimConfig::default() },
        };

        let mut builder = LaunchConfigBuilder::from(base.launch);
        if let Some(v) = self.height {
            builder = builder.initial_height(v);
        }
        if let Some(v) = self.angle {
            builder = builder.angle_degrees(v);
        }
        if let Some(v) = self.speed {
            builder = builder.speed(v);
        }
        if let Some(v) = self.gravity {
            builder = builder.gravity(v);
        }

        let sim = SimConfig {
            dt: self.dt.unwrap_or(base.sim.dt),
            max_time: self.max_time.unwrap_or(base.sim.max_time),
        };
        Ok(Scenario { launch: builder.build()?, sim })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        launch: LaunchArgs,
    }

    fn parse(args: &[&str]) -> LaunchArgs {
        TestCli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .launch
    }

    #[test]
    fn defaults_to_standard_lob() {
        let s = parse(&[]).resolve().unwrap();
        assert_eq!(s.launch, presets::lob());
        assert_eq!(s.sim, SimConfig::default());
    }

    #[test]
    fn flags_override_preset() {
        let s = parse(&["--preset", "ledge", "--speed", "2", "--gravity", "-1.62", "--dt", "0.05"])
            .resolve()
            .unwrap();
        assert_eq!(s.launch.initial_height(), 10.0);
        assert_eq!(s.launch.launch_speed(), 2.0);
        assert_eq!(s.launch.gravity(), -1.62);
        assert_eq!(s.sim.dt, 0.05);
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let err = parse(&["--preset", "cannon"]).resolve().unwrap_err();
        assert_eq!(err.stage(), "configuration");
    }

    #[test]
    fn invalid_override_is_rejected() {
        assert!(parse(&["--speed", "-4"]).resolve().is_err());
    }
}
