use crate::dynamics::state::{Phase, SimConfig, SimulationState, Trajectory};
use crate::error::{Result, SimError};
use crate::io::recorder::{MemoryRecorder, Recorder, RecordingSummary};
use crate::launch::LaunchConfig;
use super::event::{ApexDetector, EventDetector, EventKind, LandingDetector, SimEvent};
use super::integrator::advance;

// ---------------------------------------------------------------------------
// Flight: current state + recorder, one step per elapsed-time increment
// ---------------------------------------------------------------------------

/// Drives one launch. Real-time callers feed frame deltas to [`Flight::step`];
/// headless callers use [`simulate_with`].
pub struct Flight<R: Recorder> {
    config: LaunchConfig,
    state: SimulationState,
    recorder: R,
    detectors: Vec<Box<dyn EventDetector>>,
    events: Vec<SimEvent>,
    steps: usize,
}

/// Outcome of a finished flight.
#[derive(Debug, Clone)]
pub struct FlightReport {
    pub final_state: SimulationState,
    pub steps: usize,
    pub events: Vec<SimEvent>,
    pub recording: RecordingSummary,
}

impl FlightReport {
    pub fn landed(&self) -> bool {
        self.final_state.is_grounded()
    }

    pub fn event(&self, kind: EventKind) -> Option<&SimEvent> {
        self.events.iter().find(|e| e.kind == kind)
    }
}

impl<R: Recorder> Flight<R> {
    /// Start a flight and record the t = 0 sample.
    pub fn new(config: LaunchConfig, mut recorder: R) -> Result<Self> {
        let state = config.initial_state();
        recorder.record(state)?;
        Ok(Self {
            config,
            state,
            recorder,
            detectors: default_detectors(),
            events: launch_events(&state),
            steps: 0,
        })
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Apply one increment. Once grounded this is a no-op and nothing is
    /// recorded, so recorded times stay strictly increasing.
    pub fn step(&mut self, dt: f64) -> Result<&SimulationState> {
        if self.state.phase() == Phase::Grounded {
            // Still reject bad increments so callers see their own errors.
            if !dt.is_finite() || dt <= 0.0 {
                return Err(SimError::Integration { dt });
            }
            return Ok(&self.state);
        }

        let next = advance(&self.state, &self.config, dt)?;
        self.recorder.record(next)?;

        for det in &mut self.detectors {
            if let Some(kind) = det.check(&self.state, &next) {
                self.events.push(SimEvent { time: next.time, kind, state: next });
            }
        }

        self.state = next;
        self.steps += 1;
        Ok(&self.state)
    }

    /// Restart from the launch state, clearing the recorder.
    pub fn restart(&mut self) -> Result<()> {
        self.recorder.reset()?;
        let state = self.config.initial_state();
        self.recorder.record(state)?;
        self.state = state;
        self.detectors = default_detectors();
        self.events = launch_events(&state);
        self.steps = 0;
        Ok(())
    }

    /// Finalize the recorder and hand it back with the flight report.
    pub fn finish(mut self) -> Result<(FlightReport, R)> {
        let recording = self.recorder.finalize()?;
        let report = FlightReport {
            final_state: self.state,
            steps: self.steps,
            events: self.events,
            recording,
        };
        Ok((report, self.recorder))
    }
}

fn default_detectors() -> Vec<Box<dyn EventDetector>> {
    vec![
        Box::new(ApexDetector::default()),
        Box::new(LandingDetector::default()),
    ]
}

fn launch_events(initial: &SimulationState) -> Vec<SimEvent> {
    match initial.phase() {
        Phase::Airborne => vec![SimEvent { time: initial.time, kind: EventKind::Launch, state: *initial }],
        Phase::Grounded => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Headless runs
// ---------------------------------------------------------------------------

/// Run fixed steps of `sim.dt` until the projectile lands or `sim.max_time`
/// is reached, recording every state.
pub fn simulate_with<R: Recorder>(
    config: &LaunchConfig,
    sim: &SimConfig,
    recorder: R,
) -> Result<(FlightReport, R)> {
    sim.validate()?;
    let mut flight = Flight::new(*config, recorder)?;
    while flight.phase() == Phase::Airborne && flight.state().time < sim.max_time {
        flight.step(sim.dt)?;
    }
    flight.finish()
}

/// Simulate into memory and return the trajectory (first sample at t = 0).
pub fn simulate(config: &LaunchConfig, sim: &SimConfig) -> Result<(Trajectory, FlightReport)> {
    let (report, recorder) = simulate_with(config, sim, MemoryRecorder::new())?;
    Ok((recorder.into_trajectory(), report))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::presets;

    fn fixed(dt: f64) -> SimConfig {
        SimConfig { dt, max_time: 30.0 }
    }

    /// Accepts `capacity` samples, then fails every write.
    #[derive(Debug)]
    struct FullDisk {
        capacity: usize,
        written: usize,
    }

    impl FullDisk {
        fn new(capacity: usize) -> Self {
            Self { capacity, written: 0 }
        }
    }

    impl Recorder for FullDisk {
        fn record(&mut self, _state: SimulationState) -> Result<()> {
            if self.written == self.capacity {
                let source = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
                return Err(SimError::recorder_io(std::path::Path::new("full.csv"), source));
            }
            self.written += 1;
            Ok(())
        }

        fn reset(&mut self) -> Result<()> {
            self.written = 0;
            Ok(())
        }

        fn len(&self) -> usize {
            self.written
        }

        fn finalize(&mut self) -> Result<RecordingSummary> {
            Ok(RecordingSummary { entries: self.written, time_span: None, path: None })
        }
    }

    #[test]
    fn lob_goes_up_and_comes_back_down() {
        let (traj, report) = simulate(&presets::lob(), &fixed(0.1)).unwrap();
        assert!(report.landed());
        let apex = traj.iter().map(|s| s.pos.y).fold(0.0_f64, f64::max);
        assert!(apex > 1.0, "Apex should be well above ground, got {}", apex);
        let last = traj.last().unwrap();
        assert_eq!(last.pos.y, 0.0);
        assert_eq!(last.vel.norm(), 0.0);
    }

    #[test]
    fn every_step_is_recorded_with_increasing_time() {
        let (traj, report) = simulate(&presets::lob(), &fixed(0.1)).unwrap();
        assert_eq!(traj.len(), report.steps + 1);
        assert_eq!(report.recording.entries, traj.len());
        assert!(traj.windows(2).all(|w| w[1].time > w[0].time));
    }

    #[test]
    fn zero_launch_records_single_grounded_sample() {
        let config = LaunchConfig::new(0.0, 45.0, 0.0, -9.81).unwrap();
        let (traj, report) = simulate(&config, &fixed(0.1)).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(traj.len(), 1);
        assert!(traj[0].is_grounded());
        assert!(report.events.is_empty());
    }

    #[test]
    fn grounded_flight_ignores_further_frames() {
        let mut flight = Flight::new(presets::drop(), MemoryRecorder::new()).unwrap();
        while flight.phase() == Phase::Airborne {
            flight.step(0.05).unwrap();
        }
        let landed = *flight.state();
        let recorded = flight.recorder().len();
        for _ in 0..10 {
            assert_eq!(*flight.step(0.05).unwrap(), landed);
        }
        assert_eq!(flight.recorder().len(), recorded);
    }

    #[test]
    fn events_in_order() {
        let (_, report) = simulate(&presets::vertical(), &fixed(0.01)).unwrap();
        let kinds: Vec<EventKind> = report.events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Launch, EventKind::Apex, EventKind::Landing]);
        let apex = report.event(EventKind::Apex).unwrap();
        // v0^2 / 2g = 7.34 m
        assert!((apex.state.pos.y - 7.34).abs() < 0.1);
    }

    #[test]
    fn max_time_stops_a_long_flight() {
        let config = LaunchConfig::new(1000.0, 0.0, 1.0, -0.1).unwrap();
        let sim = SimConfig { dt: 0.5, max_time: 5.0 };
        let (traj, report) = simulate(&config, &sim).unwrap();
        assert!(!report.landed());
        assert!((traj.last().unwrap().time - 5.0).abs() < 1e-9);
    }

    #[test]
    fn bad_step_size_is_rejected_before_recording() {
        let sim = SimConfig { dt: 0.0, max_time: 5.0 };
        let err = simulate(&presets::lob(), &sim).unwrap_err();
        assert_eq!(err.stage(), "integration");
    }

    #[test]
    fn restart_clears_recording() {
        let mut flight = Flight::new(presets::lob(), MemoryRecorder::new()).unwrap();
        for _ in 0..5 {
            flight.step(0.1).unwrap();
        }
        flight.restart().unwrap();
        assert_eq!(flight.recorder().len(), 1);
        assert_eq!(flight.state(), &presets::lob().initial_state());
        assert_eq!(flight.steps(), 0);
    }

    #[test]
    fn failed_write_leaves_flight_where_it_was() {
        let mut flight = Flight::new(presets::lob(), FullDisk::new(3)).unwrap();
        flight.step(0.1).unwrap();
        flight.step(0.1).unwrap();
        let before = *flight.state();

        let err = flight.step(0.1).unwrap_err();
        assert_eq!(err.stage(), "recording");
        assert!(matches!(err, SimError::RecorderIo { .. }));
        assert_eq!(flight.state(), &before);
        assert_eq!(flight.steps(), 2);
        assert_eq!(flight.recorder().len(), 3);
    }

    #[test]
    fn failed_write_ends_a_headless_run() {
        let err = simulate_with(&presets::lob(), &fixed(0.1), FullDisk::new(5)).unwrap_err();
        assert_eq!(err.stage(), "recording");

        // Even the launch sample has to land somewhere
        let err = Flight::new(presets::lob(), FullDisk::new(0)).err().unwrap();
        assert_eq!(err.stage(), "recording");
    }
}
