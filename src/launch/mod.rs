pub mod config;
pub mod scenario;

pub use config::{LaunchConfig, LaunchConfigBuilder, presets};
pub use scenario::Scenario;
