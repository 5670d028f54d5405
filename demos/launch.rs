use projectile_sim::analysis;
use projectile_sim::io::{csv, json};
use projectile_sim::launch::presets;
use projectile_sim::sim;
use projectile_sim::types::SimConfig;

fn main() {
    let launch = presets::lob();
    let config = SimConfig { dt: 0.01, max_time: 30.0 };

    println!(
        "Launching at {:.0} deg, {:.1} m/s ...",
        launch.launch_angle_degrees(),
        launch.launch_speed()
    );
    let (trajectory, report) = sim::simulate(&launch, &config).expect("simulation failed");

    let summary = analysis::analyze(&trajectory).expect("empty trajectory").summary;
    println!("Max height: {:.2} m", summary.max_height);
    println!("Range: {:.2} m", summary.range);
    println!("Flight time: {:.2} s ({} steps)", summary.duration, report.steps);

    csv::write_trajectory_file("lob_trajectory.csv", &trajectory).expect("Failed to write CSV");
    json::write_summary_file("lob_summary.json", "lob_trajectory.csv", &summary)
        .expect("Failed to write JSON");

    println!("Exported: lob_trajectory.csv, lob_summary.json");
}
