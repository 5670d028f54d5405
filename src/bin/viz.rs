use std::path::PathBuf;

use clap::Parser;
use eframe::egui::{self, Color32, Pos2, Rect, Sense, Vec2};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use projectile_sim::analysis::{self, AnalysisReport};
use projectile_sim::cli::LaunchArgs;
use projectile_sim::io::{files, CsvRecorder, Recorder};
use projectile_sim::render::ScreenMapping;
use projectile_sim::sim::Flight;
use projectile_sim::types::{LaunchConfig, Phase};

const SKY_BLUE: Color32 = Color32::from_rgb(173, 216, 230);
const GRASS_GREEN: Color32 = Color32::from_rgb(0, 128, 0);
const BALL_RED: Color32 = Color32::from_rgb(255, 0, 0);
const BALL_RADIUS_PX: f32 = 30.0;
const GROUND_PX: f32 = 100.0;
const VISIBLE_HEIGHT_M: f32 = 10.0;
const MAX_FRAME_DT: f64 = 0.1; // s, long stalls are clamped

const TEAL: Color32 = Color32::from_rgb(0x4D, 0xD0, 0xE1);
const LIGHT_GREY: Color32 = Color32::from_rgb(0xE0, 0xE0, 0xE0);
const BLUE: Color32 = Color32::from_rgb(0x64, 0x95, 0xED);
const ORANGE: Color32 = Color32::from_rgb(0xFF, 0xA0, 0x00);
const LIGHT_BLUE: Color32 = Color32::from_rgb(0x90, 0xCA, 0xF9);

#[derive(Parser)]
#[command(name = "projectile-viz")]
#[command(about = "Live projectile animation and trajectory charts", long_about = None)]
struct Args {
    #[command(flatten)]
    launch: LaunchArgs,

    /// Show charts for a recorded trajectory instead of flying
    #[arg(long, conflicts_with = "latest")]
    analyze: Option<PathBuf>,

    /// Show charts for the newest projectile_data_*.csv in the working directory
    #[arg(long)]
    latest: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let launch = args.launch.resolve()?.launch;
    let mode = if let Some(path) = args.analyze {
        Mode::Charts(load(path))
    } else if args.latest {
        let path = files::find_latest(".")
            .ok_or_else(|| anyhow::anyhow!("no projectile data CSV files found"))?;
        Mode::Charts(load(path))
    } else {
        Mode::Live(start_flight(launch)?)
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Projectile Simulation",
        options,
        Box::new(|_| Ok(Box::new(SimViz { mode, launch, error: None }))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

fn start_flight(config: LaunchConfig) -> anyhow::Result<Flight<CsvRecorder>> {
    let recorder = CsvRecorder::create(files::default_output_name())?;
    Ok(Flight::new(config, recorder)?)
}

fn load(path: PathBuf) -> Loaded {
    let report = analysis::analyze_file(&path);
    Loaded { path, report }
}

struct Loaded {
    path: PathBuf,
    report: projectile_sim::Result<AnalysisReport>,
}

enum Mode {
    Live(Flight<CsvRecorder>),
    Charts(Loaded),
    Idle,
}

struct SimViz {
    mode: Mode,
    launch: LaunchConfig,
    error: Option<String>,
}

/// What one display frame did to a live flight.
#[derive(Debug, PartialEq)]
enum Frame {
    Flying,
    Landed,
    Failed(String),
}

fn advance_frame<R: Recorder>(flight: &mut Flight<R>, dt: f64) -> Frame {
    if dt > 0.0 && flight.phase() == Phase::Airborne {
        if let Err(e) = flight.step(dt.min(MAX_FRAME_DT)) {
            return Frame::Failed(format!("{}: {e}", e.stage()));
        }
    }
    match flight.phase() {
        Phase::Airborne => Frame::Flying,
        Phase::Grounded => Frame::Landed,
    }
}

impl SimViz {
    /// Advance the live flight by one frame; on landing swap to the charts.
    /// A failed write ends the flight and leaves the error on screen.
    fn tick(&mut self, dt: f64) {
        let frame = match &mut self.mode {
            Mode::Live(flight) => advance_frame(flight, dt),
            _ => return,
        };
        self.after_frame(frame);
    }

    fn after_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Flying => {}
            Frame::Landed => self.land(),
            Frame::Failed(msg) => {
                self.mode = Mode::Idle;
                self.error = Some(msg);
            }
        }
    }

    fn land(&mut self) {
        if let Mode::Live(flight) = std::mem::replace(&mut self.mode, Mode::Idle) {
            match flight.finish() {
                Ok((report, _)) => {
                    let path = report.recording.path.unwrap_or_default();
                    self.mode = Mode::Charts(load(path));
                }
                Err(e) => self.error = Some(format!("{}: {e}", e.stage())),
            }
        }
    }

    fn replay(&mut self) {
        match start_flight(self.launch) {
            Ok(flight) => {
                self.mode = Mode::Live(flight);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.unstable_dt) as f64;
        self.tick(dt);

        let mut replay = false;
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            match &self.mode {
                Mode::Live(flight) => {
                    let s = flight.state();
                    ui.label(format!(
                        "t={:.2} s  |  x={:.2} m  y={:.2} m  |  vx={:.2} m/s  vy={:.2} m/s",
                        s.time, s.pos.x, s.pos.y, s.vel.x, s.vel.y
                    ));
                }
                Mode::Idle => {
                    if ui.button("New flight").clicked() {
                        replay = true;
                    }
                }
                Mode::Charts(loaded) => {
                    ui.horizontal(|ui| {
                        ui.heading(format!("Projectile Motion Analysis: {}", loaded.path.display()));
                        if ui.button("New flight").clicked() {
                            replay = true;
                        }
                    });
                }
            }
            if let Some(err) = &self.error {
                ui.colored_label(Color32::RED, err);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| match &self.mode {
            Mode::Live(flight) => draw_scene(ui, &flight.state().pos),
            Mode::Charts(loaded) => match &loaded.report {
                Ok(report) => draw_charts(ui, report),
                Err(e) => {
                    ui.label(format!("{}: {e}", e.stage()));
                }
            },
            Mode::Idle => {}
        });

        if replay {
            self.replay();
        }
        if matches!(self.mode, Mode::Live(_)) {
            ctx.request_repaint();
        }
    }
}

fn draw_scene(ui: &mut egui::Ui, pos: &nalgebra::Vector2<f64>) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let rect = response.rect;
    let mapping = ScreenMapping::new(rect.width(), rect.height(), GROUND_PX, VISIBLE_HEIGHT_M);

    painter.rect_filled(rect, 0.0, SKY_BLUE);
    let ground = Rect::from_min_max(
        Pos2::new(rect.left(), rect.top() + mapping.ground_y),
        rect.right_bottom(),
    );
    painter.rect_filled(ground, 0.0, GRASS_GREEN);

    // Ball rests on its bottom point.
    let [bx, by] = mapping.to_screen(pos);
    let center = rect.min + Vec2::new(bx, by - BALL_RADIUS_PX);
    painter.circle_filled(center, BALL_RADIUS_PX, BALL_RED);
}

fn draw_charts(ui: &mut egui::Ui, report: &AnalysisReport) {
    let s = &report.summary;
    let c = &report.series;
    let available = ui.available_size();
    let half_w = available.x / 2.0 - 8.0;
    let half_h = available.y / 2.0 - 28.0;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(format!(
                "Kinetic Energy vs Time   (max {:.2} J, min {:.2} J)",
                s.kinetic_energy.max, s.kinetic_energy.min
            ));
            Plot::new("kinetic_energy")
                .width(half_w)
                .height(half_h)
                .x_axis_label("Time (s)")
                .y_axis_label("Kinetic Energy (J)")
                .show(ui, |plot_ui| {
                    let pts: PlotPoints = c.kinetic_energy.iter().copied().collect();
                    plot_ui.line(Line::new("KE", pts).color(TEAL));
                });
        });

        ui.vertical(|ui| {
            ui.label(format!(
                "Trajectory (Y vs X)   (max height {:.2} m, range {:.2} m)",
                s.max_height, s.range
            ));
            Plot::new("trajectory")
                .width(half_w)
                .height(half_h)
                .x_axis_label("X Position (m)")
                .y_axis_label("Y Position (m)")
                .data_aspect(1.0)
                .show(ui, |plot_ui| {
                    let pts: PlotPoints = c.trajectory.iter().copied().collect();
                    plot_ui.line(Line::new("Trajectory", pts).color(LIGHT_GREY));
                });
        });
    });

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(format!(
                "Velocity Components vs Time   (vx initial {:.2} m/s, vy [{:.2}, {:.2}] m/s)",
                s.initial_velocity.x, s.velocity_y.min, s.velocity_y.max
            ));
            Plot::new("velocity")
                .width(half_w)
                .height(half_h)
                .x_axis_label("Time (s)")
                .y_axis_label("Velocity (m/s)")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    let pts: PlotPoints = c.velocity_x.iter().copied().collect();
                    plot_ui.line(Line::new("Velocity X", pts).color(BLUE));
                    let pts: PlotPoints = c.velocity_y.iter().copied().collect();
                    plot_ui.line(Line::new("Velocity Y", pts).color(ORANGE));
                });
        });

        ui.vertical(|ui| {
            ui.label(format!(
                "Displacement from Origin vs Time   (max {:.2} m, final {:.2} m)",
                s.max_displacement, s.final_displacement
            ));
            Plot::new("displacement")
                .width(half_w)
                .height(half_h)
                .x_axis_label("Time (s)")
                .y_axis_label("Displacement (m)")
                .show(ui, |plot_ui| {
                    let pts: PlotPoints = c.displacement.iter().copied().collect();
                    plot_ui.line(Line::new("Displacement", pts).color(LIGHT_BLUE));
                });
        });
    });
}
