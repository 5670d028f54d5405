use std::fmt;
use std::path::{Path, PathBuf};

use nalgebra::Vector2;

use crate::dynamics::state::{SimulationState, UNIT_MASS};
use crate::error::{DataErrorKind, Result, SimError};
use crate::io::csv::read_trajectory_file;
use super::metrics::{displacement, kinetic_energy, Extrema};

// ---------------------------------------------------------------------------
// Chart series: [x, y] points, ready for plotting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ChartSeries {
    pub kinetic_energy: Vec<[f64; 2]>,   // (t, KE)
    pub trajectory: Vec<[f64; 2]>,       // (x, y)
    pub velocity_x: Vec<[f64; 2]>,       // (t, vx)
    pub velocity_y: Vec<[f64; 2]>,       // (t, vy)
    pub displacement: Vec<[f64; 2]>,     // (t, |r - r0|)
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub duration: f64,                   // s, time of the last sample
    pub data_points: usize,
    pub initial_position: Vector2<f64>,
    pub final_position: Vector2<f64>,
    pub initial_velocity: Vector2<f64>,
    pub final_velocity: Vector2<f64>,
    pub max_height: f64,
    pub range: f64,                      // max x - min x
    pub kinetic_energy: Extrema,
    pub velocity_y: Extrema,
    pub max_displacement: f64,
    pub final_displacement: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{rule}")?;
        writeln!(f, "PHYSICS ANALYSIS SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Simulation Duration: {:.3} seconds", self.duration)?;
        writeln!(f, "Data Points: {}", self.data_points)?;
        writeln!(
            f,
            "Initial Position: ({:.3}, {:.3}) m",
            self.initial_position.x, self.initial_position.y
        )?;
        writeln!(
            f,
            "Final Position: ({:.3}, {:.3}) m",
            self.final_position.x, self.final_position.y
        )?;
        writeln!(
            f,
            "Initial Velocity: ({:.3}, {:.3}) m/s",
            self.initial_velocity.x, self.initial_velocity.y
        )?;
        writeln!(
            f,
            "Final Velocity: ({:.3}, {:.3}) m/s",
            self.final_velocity.x, self.final_velocity.y
        )?;
        writeln!(f, "Maximum Height: {:.3} m", self.max_height)?;
        writeln!(f, "Range: {:.3} m", self.range)?;
        writeln!(f, "Maximum Kinetic Energy: {:.3} J", self.kinetic_energy.max)?;
        writeln!(f, "Minimum Kinetic Energy: {:.3} J", self.kinetic_energy.min)?;
        writeln!(f, "Maximum Displacement: {:.3} m", self.max_displacement)?;
        write!(f, "{rule}")
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub series: ChartSeries,
    pub summary: Summary,
}

/// Analyze a trajectory with unit mass.
pub fn analyze(samples: &[SimulationState]) -> Result<AnalysisReport> {
    analyze_with_mass(samples, UNIT_MASS)
}

/// Derive energy and displacement for every sample plus summary extrema.
/// Displacement is measured from the first sample.
pub fn analyze_with_mass(samples: &[SimulationState], mass: f64) -> Result<AnalysisReport> {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(SimError::data(None, DataErrorKind::Empty)),
    };
    let origin = first.pos;

    let n = samples.len();
    let mut series = ChartSeries {
        kinetic_energy: Vec::with_capacity(n),
        trajectory: Vec::with_capacity(n),
        velocity_x: Vec::with_capacity(n),
        velocity_y: Vec::with_capacity(n),
        displacement: Vec::with_capacity(n),
    };
    for s in samples {
        series.kinetic_energy.push([s.time, kinetic_energy(s, mass)]);
        series.trajectory.push([s.pos.x, s.pos.y]);
        series.velocity_x.push([s.time, s.vel.x]);
        series.velocity_y.push([s.time, s.vel.y]);
        series.displacement.push([s.time, displacement(s, &origin)]);
    }

    // Non-empty input, so every series has extrema.
    let extrema = |points: &[[f64; 2]]| {
        Extrema::of(points.iter().map(|p| p[1])).unwrap_or(Extrema { min: 0.0, max: 0.0 })
    };
    let x = Extrema::of(samples.iter().map(|s| s.pos.x)).unwrap_or(Extrema { min: 0.0, max: 0.0 });
    let y = extrema(&series.trajectory);
    let disp = extrema(&series.displacement);
    let final_displacement = series.displacement.last().map_or(0.0, |p| p[1]);

    let summary = Summary {
        duration: last.time,
        data_points: n,
        initial_position: first.pos,
        final_position: last.pos,
        initial_velocity: first.vel,
        final_velocity: last.vel,
        max_height: y.max,
        range: x.span(),
        kinetic_energy: extrema(&series.kinetic_energy),
        velocity_y: extrema(&series.velocity_y),
        max_displacement: disp.max,
        final_displacement,
    };

    Ok(AnalysisReport { series, summary })
}

/// Load a persisted trajectory and analyze it. Errors name the file.
pub fn analyze_file(path: impl AsRef<Path>) -> Result<AnalysisReport> {
    let path = path.as_ref();
    let samples = read_trajectory_file(path)?;
    analyze(&samples).map_err(|e| match e {
        SimError::AnalysisData { kind, .. } => SimError::data(Some(path), kind),
        other => other,
    })
}

/// Result of analyzing one file in a batch.
#[derive(Debug)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub result: Result<AnalysisReport>,
}

/// Analyze every file independently; one bad file never stops the rest.
pub fn analyze_files<I, P>(paths: I) -> Vec<FileAnalysis>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|p| {
            let path = p.as_ref().to_path_buf();
            let result = analyze_file(&path);
            FileAnalysis { path, result }
        })
        .collect()
}
