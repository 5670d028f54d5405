use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use projectile_sim::analysis::{self, AnalysisReport};
use projectile_sim::cli::LaunchArgs;
use projectile_sim::io::{files, json, CsvRecorder};
use projectile_sim::sim::{self, EventKind, FlightReport};
use projectile_sim::types::Scenario;
use projectile_sim::SimError;

#[derive(Parser)]
#[command(name = "projectile-sim")]
#[command(version)]
#[command(about = "2D projectile flight simulator and trajectory analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fly one launch headless and record every step to CSV
    Simulate {
        #[command(flatten)]
        launch: LaunchArgs,

        /// Output file (".csv" appended if missing); timestamped name by default
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Analyze recorded trajectories
    Analyze {
        /// Trajectory files; the newest projectile_data_*.csv in --dir if omitted
        files: Vec<PathBuf>,

        /// Directory searched when no files are given
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Also write <file>_summary.json next to each trajectory
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Simulate { launch, output } => run_simulate(&launch, output),
        Command::Analyze { files, dir, json } => run_analyze(files, &dir, json),
    }
}

/// Prefix the failed stage, so `{:#}` prints `<stage>: <message>`.
fn stage(err: SimError) -> anyhow::Error {
    let stage = err.stage();
    anyhow::Error::new(err).context(stage)
}

// ---------------------------------------------------------------------------
// simulate
// ---------------------------------------------------------------------------

fn run_simulate(args: &LaunchArgs, output: Option<PathBuf>) -> Result<()> {
    let Scenario { launch, sim } = args.resolve().map_err(stage)?;
    sim.validate().map_err(stage)?;

    println!("Initial Velocity X: {:.2} m/s", launch.initial_vx());
    println!("Initial Velocity Y: {:.2} m/s", launch.initial_vy());

    let path = output.map_or_else(files::default_output_name, files::with_csv_extension);
    let recorder = CsvRecorder::create(&path).map_err(stage)?;
    println!("Recording trajectory to: {}", path.display());

    let (report, _) = sim::simulate_with(&launch, &sim, recorder).map_err(stage)?;
    print_flight(&report, sim.dt);
    Ok(())
}

fn print_flight(report: &FlightReport, dt: f64) {
    println!();
    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &report.events {
        let label = match e.kind {
            EventKind::Launch => "LAUNCH",
            EventKind::Apex => "APEX",
            EventKind::Landing => "LANDING",
        };
        println!(
            "  {:<8} t={:>7.3}s   x={:>8.3}m   y={:>8.3}m   speed={:>7.3}m/s",
            label,
            e.time,
            e.state.pos.x,
            e.state.pos.y,
            e.state.speed(),
        );
    }
    if !report.landed() {
        println!(
            "  (no landing before t={:.3}s)",
            report.final_state.time
        );
    }
    println!();
    println!("  Simulation: {} steps, dt={} s", report.steps, dt);
    println!("  {}", report.recording);
    println!();
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

fn run_analyze(mut paths: Vec<PathBuf>, dir: &Path, write_json: bool) -> Result<()> {
    if paths.is_empty() {
        let latest = files::find_latest(dir)
            .ok_or_else(|| anyhow!("no projectile data CSV files found in {}", dir.display()))
            .context("analysis")?;
        println!("Using latest trajectory file: {}", latest.display());
        paths.push(latest);
    }

    let failures = analyze_batch(&paths, write_json);
    if failures == paths.len() {
        return Err(anyhow!("no trajectory could be analyzed")).context("analysis");
    }
    Ok(())
}

/// Analyze every file, reporting failures per file. Returns how many failed.
fn analyze_batch(paths: &[PathBuf], write_json: bool) -> usize {
    let mut failures = 0;
    for item in analysis::analyze_files(paths) {
        let outcome = item.result.and_then(|report| {
            print_report(&item.path, &report);
            if write_json {
                write_json_summary(&item.path, &report)?;
            }
            Ok(())
        });
        if let Err(e) = outcome {
            failures += 1;
            eprintln!("error: {}: {e}", e.stage());
        }
    }
    failures
}

fn print_report(path: &Path, report: &AnalysisReport) {
    let s = &report.summary;
    println!();
    println!("Loaded {} data points from {}", s.data_points, path.display());
    println!(
        "  Kinetic Energy   max {:>8.2} J     min {:>8.2} J",
        s.kinetic_energy.max, s.kinetic_energy.min
    );
    println!(
        "  Trajectory       max height {:>6.2} m   range {:>6.2} m",
        s.max_height, s.range
    );
    println!(
        "  Velocity         vx(initial) {:>6.2} m/s   vy [{:.2}, {:.2}] m/s",
        s.initial_velocity.x, s.velocity_y.min, s.velocity_y.max
    );
    println!(
        "  Displacement     max {:>8.2} m     final {:>8.2} m",
        s.max_displacement, s.final_displacement
    );
    println!();
    println!("{s}");
}

fn write_json_summary(path: &Path, report: &AnalysisReport) -> projectile_sim::Result<()> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("trajectory");
    let out = path.with_file_name(format!("{stem}_summary.json"));
    let source = path.file_name().and_then(|s| s.to_str()).unwrap_or(stem);
    json::write_summary_file(&out, source, &report.summary)?;
    println!("Summary saved as: {}", out.display());
    Ok(())
}
