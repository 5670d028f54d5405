use crate::dynamics::state::{Phase, SimulationState};

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Launch,
    Apex,
    Landing,
}

/// A discrete event that occurred during a flight.
#[derive(Debug, Clone, Copy)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: SimulationState,
}

/// Passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &SimulationState, current: &SimulationState) -> Option<EventKind>;
}

/// Detects the apex (vertical velocity turning from up to down).
#[derive(Debug, Default)]
pub struct ApexDetector {
    fired: bool,
}

impl EventDetector for ApexDetector {
    fn check(&mut self, prev: &SimulationState, current: &SimulationState) -> Option<EventKind> {
        if self.fired || current.is_grounded() {
            return None;
        }
        if prev.vel.y > 0.0 && current.vel.y <= 0.0 {
            self.fired = true;
            Some(EventKind::Apex)
        } else {
            None
        }
    }
}

/// Detects the Airborne -> Grounded transition.
#[derive(Debug, Default)]
pub struct LandingDetector {
    fired: bool,
}

impl EventDetector for LandingDetector {
    fn check(&mut self, prev: &SimulationState, current: &SimulationState) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.phase() == Phase::Airborne && current.phase() == Phase::Grounded {
            self.fired = true;
            Some(EventKind::Landing)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state(y: f64, vy: f64) -> SimulationState {
        SimulationState::new(0.0, 0.0, y, 1.0, vy)
    }

    #[test]
    fn apex_detected_once() {
        let mut det = ApexDetector::default();
        let prev = make_state(2.0, 0.3);
        let curr = make_state(2.01, -0.6);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::Apex));
        assert!(det.check(&prev, &curr).is_none());
    }

    #[test]
    fn apex_not_reported_on_landing_step() {
        // Short hop that lands within the step where vy turns negative
        let mut det = ApexDetector::default();
        let prev = make_state(0.01, 0.2);
        let curr = SimulationState::new(0.1, 0.1, 0.0, 0.0, 0.0);
        assert!(det.check(&prev, &curr).is_none());
    }

    #[test]
    fn landing_detected() {
        let mut det = LandingDetector::default();
        let prev = make_state(0.3, -5.0);
        let curr = SimulationState::new(1.0, 3.0, 0.0, 0.0, 0.0);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::Landing));
        assert!(det.check(&curr, &curr).is_none());
    }
}
