use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dynamics::state::{SimulationState, Trajectory};
use crate::error::{DataErrorKind, Result, SimError};
use super::recorder::{Recorder, RecordingSummary, SpanTracker};

/// Column names of the persisted trajectory, in order.
pub const HEADER: [&str; 5] = ["Time", "X_Position", "Y_Position", "Velocity_X", "Velocity_Y"];

/// One persisted sample. Field order is column order.
#[derive(Debug, Serialize, Deserialize)]
struct Row {
    #[serde(rename = "Time")]
    time: f64,
    #[serde(rename = "X_Position")]
    x: f64,
    #[serde(rename = "Y_Position")]
    y: f64,
    #[serde(rename = "Velocity_X")]
    vx: f64,
    #[serde(rename = "Velocity_Y")]
    vy: f64,
}

impl Row {
    fn is_finite(&self) -> bool {
        [self.time, self.x, self.y, self.vx, self.vy].iter().all(|v| v.is_finite())
    }
}

impl From<&SimulationState> for Row {
    fn from(s: &SimulationState) -> Self {
        Row { time: s.time, x: s.pos.x, y: s.pos.y, vx: s.vel.x, vy: s.vel.y }
    }
}

impl From<Row> for SimulationState {
    fn from(r: Row) -> Self {
        SimulationState::new(r.time, r.x, r.y, r.vx, r.vy)
    }
}

fn headerless_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(writer)
}

// ---------------------------------------------------------------------------
// Whole-trajectory export
// ---------------------------------------------------------------------------

/// Write a complete trajectory, header first.
pub fn write_trajectory<W: Write>(writer: W, trajectory: &[SimulationState]) -> io::Result<()> {
    let mut w = headerless_writer(writer);
    w.write_record(HEADER)?;
    for s in trajectory {
        w.serialize(Row::from(s))?;
    }
    w.flush()
}

/// Write a trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: impl AsRef<Path>, trajectory: &[SimulationState]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SimError::recorder_io(path, e))?;
    write_trajectory(file, trajectory).map_err(|e| SimError::recorder_io(path, e))
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse a persisted trajectory. A header-only file yields an empty trajectory.
pub fn read_trajectory<R: Read>(reader: R) -> Result<Trajectory> {
    read_rows(reader, None)
}

pub fn read_trajectory_file(path: impl AsRef<Path>) -> Result<Trajectory> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        let kind = if e.kind() == io::ErrorKind::NotFound {
            DataErrorKind::Missing
        } else {
            DataErrorKind::Malformed(e.to_string())
        };
        SimError::data(Some(path), kind)
    })?;
    read_rows(file, Some(path))
}

fn read_rows<R: Read>(reader: R, path: Option<&Path>) -> Result<Trajectory> {
    let malformed = |msg: String| SimError::data(path, DataErrorKind::Malformed(msg));

    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers().map_err(|e| malformed(e.to_string()))?;
    if headers.is_empty() {
        return Err(SimError::data(path, DataErrorKind::Empty));
    }
    if headers.iter().ne(HEADER) {
        return Err(malformed(format!(
            "expected header {}, found {}",
            HEADER.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    rdr.deserialize::<Row>()
        .enumerate()
        .map(|(i, row)| {
            let row = row.map_err(|e| malformed(e.to_string()))?;
            if !row.is_finite() {
                return Err(malformed(format!("non-finite value in row {}", i + 1)));
            }
            Ok(SimulationState::from(row))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV recorder: one durable row per sample
// ---------------------------------------------------------------------------

/// File-backed recorder. The header is written when the file is created and
/// every `record` call is flushed to the file before returning.
pub struct CsvRecorder {
    path: PathBuf,
    writer: csv::Writer<File>,
    span: SpanTracker,
}

impl CsvRecorder {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let writer = open_with_header(&path)?;
        Ok(Self { path, writer, span: SpanTracker::default() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_with_header(path: &Path) -> Result<csv::Writer<File>> {
    let file = File::create(path).map_err(|e| SimError::recorder_io(path, e))?;
    let mut writer = headerless_writer(file);
    writer.write_record(HEADER).map_err(|e| SimError::recorder_io(path, e))?;
    writer.flush().map_err(|e| SimError::recorder_io(path, e))?;
    Ok(writer)
}

impl Recorder for CsvRecorder {
    fn record(&mut self, state: SimulationState) -> Result<()> {
        self.writer
            .serialize(Row::from(&state))
            .map_err(|e| SimError::recorder_io(&self.path, e))?;
        self.writer.flush().map_err(|e| SimError::recorder_io(&self.path, e))?;
        self.span.push(state.time);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.writer = open_with_header(&self.path)?;
        self.span = SpanTracker::default();
        Ok(())
    }

    fn len(&self) -> usize {
        self.span.entries()
    }

    fn finalize(&mut self) -> Result<RecordingSummary> {
        self.writer.flush().map_err(|e| SimError::recorder_io(&self.path, e))?;
        Ok(self.span.summary(Some(self.path.clone())))
    }
}
