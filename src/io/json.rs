use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::analysis::Summary;
use crate::error::{Result, SimError};

/// Write an analysis summary as JSON to a writer.
/// `source` names the trajectory file the summary was computed from.
pub fn write_summary<W: Write>(writer: &mut W, source: &str, summary: &Summary) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"source\": \"{}\",", escape(source))?;
    writeln!(writer, "  \"data_points\": {},", summary.data_points)?;
    writeln!(writer, "  \"duration_s\": {:.3},", summary.duration)?;
    writeln!(writer, "  \"position\": {{")?;
    writeln!(
        writer,
        "    \"initial_m\": [{:.3}, {:.3}],",
        summary.initial_position.x, summary.initial_position.y
    )?;
    writeln!(
        writer,
        "    \"final_m\": [{:.3}, {:.3}]",
        summary.final_position.x, summary.final_position.y
    )?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"velocity\": {{")?;
    writeln!(
        writer,
        "    \"initial_ms\": [{:.3}, {:.3}],",
        summary.initial_velocity.x, summary.initial_velocity.y
    )?;
    writeln!(
        writer,
        "    \"final_ms\": [{:.3}, {:.3}],",
        summary.final_velocity.x, summary.final_velocity.y
    )?;
    writeln!(
        writer,
        "    \"vy_range_ms\": [{:.3}, {:.3}]",
        summary.velocity_y.min, summary.velocity_y.max
    )?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"performance\": {{")?;
    writeln!(writer, "    \"max_height_m\": {:.3},", summary.max_height)?;
    writeln!(writer, "    \"range_m\": {:.3},", summary.range)?;
    writeln!(writer, "    \"max_kinetic_energy_j\": {:.3},", summary.kinetic_energy.max)?;
    writeln!(writer, "    \"min_kinetic_energy_j\": {:.3},", summary.kinetic_energy.min)?;
    writeln!(writer, "    \"max_displacement_m\": {:.3},", summary.max_displacement)?;
    writeln!(writer, "    \"final_displacement_m\": {:.3}", summary.final_displacement)?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, source: &str, summary: &Summary) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|e| SimError::recorder_io(path, e))?;
    write_summary(&mut file, source, summary).map_err(|e| SimError::recorder_io(path, e))
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
