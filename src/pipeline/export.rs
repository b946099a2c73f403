//! Angle stream export
//!
//! Writes the `servo1,servo2` lines the SD-card firmware replays, and
//! summarizes a stream for display.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::pipeline::engine::{ActuatorCommand, PipelineOutput};

/// Rough firmware time per replayed line
const SECONDS_PER_POINT: f64 = 0.1;

/// Write one `servo1,servo2` line per command
pub fn write_actuator_stream<W: Write>(
    writer: W,
    commands: &[ActuatorCommand],
) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for command in commands {
        writeln!(writer, "{}", command)?;
    }
    writer.flush()
}

/// Create or overwrite `path` with the stream, returning its absolute path
pub fn export_to_file(path: &Path, commands: &[ActuatorCommand]) -> Result<PathBuf> {
    if commands.is_empty() {
        bail!("No angles to export");
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_actuator_stream(file, commands)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    log::info!("Wrote {} angle pairs to {}", commands.len(), absolute.display());
    Ok(absolute)
}

/// Summary of a generated stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_points: usize,
    pub servo1_range: (i32, i32),
    pub servo2_range: (i32, i32),
    pub estimated_time_seconds: f64,
    pub errors: usize,
}

impl Statistics {
    /// `None` when there is nothing to summarize
    pub fn from_output(output: &PipelineOutput) -> Option<Self> {
        let first = output.commands.first()?;

        let (servo1_range, servo2_range) = output.commands.iter().fold(
            ((first.servo1, first.servo1), (first.servo2, first.servo2)),
            |((min1, max1), (min2, max2)), c| {
                (
                    (min1.min(c.servo1), max1.max(c.servo1)),
                    (min2.min(c.servo2), max2.max(c.servo2)),
                )
            },
        );

        Some(Self {
            total_points: output.commands.len(),
            servo1_range,
            servo2_range,
            estimated_time_seconds: output.commands.len() as f64 * SECONDS_PER_POINT,
            errors: output.errors.len(),
        })
    }
}

/// Human-readable listing of the first `max_lines` commands
pub fn preview(commands: &[ActuatorCommand], max_lines: usize) -> String {
    if commands.is_empty() {
        return "No data to preview".to_string();
    }

    let mut lines = vec!["Servo Angles Preview:".to_string(), "-".repeat(30)];

    lines.extend(
        commands
            .iter()
            .take(max_lines)
            .enumerate()
            .map(|(i, c)| format!("{:4}: {:3}, {:3}", i + 1, c.servo1, c.servo2)),
    );

    if commands.len() > max_lines {
        lines.push(format!("... ({} more lines)", commands.len() - max_lines));
    }

    lines.join("\n")
}
