use std::fmt;
use std::path::PathBuf;

use crate::dynamics::state::{SimulationState, Trajectory};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Recorder: append-only sink of state samples
// ---------------------------------------------------------------------------

/// Ordered, append-only sink for simulation samples.
///
/// Ordering is whatever the caller hands in; recorders never sort,
/// deduplicate or rewrite past entries.
pub trait Recorder {
    /// Append exactly one entry.
    fn record(&mut self, state: SimulationState) -> Result<()>;

    /// Drop every entry and start over with a fresh header.
    fn reset(&mut self) -> Result<()>;

    /// Number of entries recorded since creation or the last reset.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush anything pending and report what was recorded.
    fn finalize(&mut self) -> Result<RecordingSummary>;
}

impl<R: Recorder + ?Sized> Recorder for &mut R {
    fn record(&mut self, state: SimulationState) -> Result<()> {
        (**self).record(state)
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn finalize(&mut self) -> Result<RecordingSummary> {
        (**self).finalize()
    }
}

// ---------------------------------------------------------------------------
// Recording summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSummary {
    pub entries: usize,
    /// (min, max) of `time` across entries; `None` when nothing was recorded.
    pub time_span: Option<(f64, f64)>,
    pub path: Option<PathBuf>,
}

impl fmt::Display for RecordingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} data points", self.entries)?;
        if let Some(path) = &self.path {
            write!(f, " saved to {}", path.display())?;
        }
        if let Some((t0, t1)) = self.time_span {
            write!(f, "\nTime range: {t0:.3}s to {t1:.3}s")?;
        }
        Ok(())
    }
}

/// Running count and time span, shared by recorder backends.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SpanTracker {
    entries: usize,
    span: Option<(f64, f64)>,
}

impl SpanTracker {
    pub(crate) fn push(&mut self, time: f64) {
        self.entries += 1;
        self.span = Some(match self.span {
            Some((lo, hi)) => (lo.min(time), hi.max(time)),
            None => (time, time),
        });
    }

    pub(crate) fn entries(&self) -> usize {
        self.entries
    }

    pub(crate) fn summary(&self, path: Option<PathBuf>) -> RecordingSummary {
        RecordingSummary { entries: self.entries, time_span: self.span, path }
    }
}

// ---------------------------------------------------------------------------
// In-memory recorder
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct MemoryRecorder {
    samples: Trajectory,
    span: SpanTracker,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[SimulationState] {
        &self.samples
    }

    pub fn into_trajectory(self) -> Trajectory {
        self.samples
    }
}

impl Recorder for MemoryRecorder {
    fn record(&mut self, state: SimulationState) -> Result<()> {
        self.span.push(state.time);
        self.samples.push(state);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.samples.clear();
        self.span = SpanTracker::default();
        Ok(())
    }

    fn len(&self) -> usize {
        self.span.entries()
    }

    fn finalize(&mut self) -> Result<RecordingSummary> {
        Ok(self.span.summary(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_caller_order_and_duplicates() {
        let mut rec = MemoryRecorder::new();
        let a = SimulationState::new(0.2, 1.0, 1.0, 0.0, 0.0);
        let b = SimulationState::new(0.1, 2.0, 2.0, 0.0, 0.0);
        rec.record(a).unwrap();
        rec.record(b).unwrap();
        rec.record(b).unwrap();
        assert_eq!(rec.samples(), &[a, b, b]);

        let summary = rec.finalize().unwrap();
        assert_eq!(summary.entries, 3);
        assert_eq!(summary.time_span, Some((0.1, 0.2)));
    }

    #[test]
    fn reset_clears_everything() {
        let mut rec = MemoryRecorder::new();
        rec.record(SimulationState::new(0.0, 0.0, 1.0, 1.0, 1.0)).unwrap();
        rec.reset().unwrap();
        assert!(rec.is_empty());
        assert_eq!(rec.finalize().unwrap().time_span, None);
    }

    #[test]
    fn summary_text() {
        let s = RecordingSummary {
            entries: 13,
            time_span: Some((0.0, 1.2)),
            path: Some(PathBuf::from("run.csv")),
        };
        assert_eq!(s.to_string(), "13 data points saved to run.csv\nTime range: 0.000s to 1.200s");
    }
}
