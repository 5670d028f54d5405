use crate::dynamics;
use crate::dynamics::state::{Phase, SimulationState};
use crate::error::{Result, SimError};
use crate::launch::LaunchConfig;

// ---------------------------------------------------------------------------
// Semi-implicit Euler step with perfectly inelastic ground contact
// ---------------------------------------------------------------------------

/// Advance `state` by `dt` seconds and return the new state.
///
/// Velocity is updated first and the updated velocity moves the position.
/// The step that takes `y` to or below zero pins the projectile to the
/// ground with zero velocity; the contact time is whatever this step's end
/// time is (no interpolation). Grounded states are returned unchanged.
pub fn advance(state: &SimulationState, config: &LaunchConfig, dt: f64) -> Result<SimulationState> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SimError::Integration { dt });
    }
    if state.phase() == Phase::Grounded {
        return Ok(*state);
    }

    let vel = state.vel + dynamics::acceleration(config) * dt;
    let mut next = SimulationState {
        time: state.time + dt,
        pos: state.pos + vel * dt,
        vel,
    };

    if next.pos.y <= 0.0 {
        next.pos.y = 0.0;
        next.vel.x = 0.0;
        next.vel.y = 0.0;
    }

    Ok(next)
}
