//! Trajectory export file
//!
//! One record per sample, semicolon separated, no header, `.` as the decimal
//! point regardless of locale:
//!
//! ```text
//! X;Y                     (ExportFields::Position)
//! X;Y;VX;VY;AX;AY         (ExportFields::Full)
//! ```
//!
//! Readers only rely on the first two fields and ignore anything after them

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::{Result, SimError};
use crate::simulation::states::{BodyId, NVec2};
use crate::simulation::trajectory::Trajectory;

pub const FIELD_SEPARATOR: char = ';';

/// File name the external producer contract writes to
pub const DEFAULT_EXPORT_FILE: &str = "simulation_data.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFields {
    #[default]
    Position,
    Full,
}

/// Write one body's samples; `f64` `Display` always uses `.` and round-trips
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &Trajectory, body: BodyId, fields: ExportFields) -> Result<()> {
    if body.0 >= trajectory.body_count() {
        return Err(SimError::UnknownBody(body));
    }
    let sep = FIELD_SEPARATOR;
    for s in trajectory {
        let x = s.positions[body.0];
        match fields {
            ExportFields::Position => writeln!(writer, "{}{sep}{}", x.x, x.y)?,
            ExportFields::Full => {
                let v = s.velocities[body.0];
                let a = s.accelerations[body.0];
                writeln!(writer, "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}", x.x, x.y, v.x, v.y, a.x, a.y)?
            }
        }
    }
    Ok(())
}

/// Write to `path`, truncating any previous run's output
pub fn write_trajectory_file(path: impl AsRef<Path>, trajectory: &Trajectory, body: BodyId, fields: ExportFields) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_trajectory(&mut writer, trajectory, body, fields)?;
    writer.flush()?;
    info!("wrote {} samples of body {} to {}", trajectory.len(), body, path.display());
    Ok(())
}

/// Read the X;Y columns back; blank lines are skipped, trailing fields ignored
pub fn read_positions<R: BufRead>(reader: R) -> Result<Vec<NVec2>> {
    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parse_err = |message: String| SimError::Parse { line: i + 1, message };

        let mut fields = line.split(FIELD_SEPARATOR).map(str::trim);
        let mut next = |name: &str| -> Result<f64> {
            let raw = fields.next().ok_or_else(|| parse_err(format!("missing {name} field")))?;
            raw.parse::<f64>().map_err(|e| parse_err(format!("bad {name} value '{raw}': {e}")))
        };
        let x = next("X")?;
        let y = next("Y")?;
        out.push(NVec2::new(x, y));
    }
    Ok(out)
}

pub fn read_positions_file(path: impl AsRef<Path>) -> Result<Vec<NVec2>> {
    read_positions(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_positions_and_ignores_trailing_fields() {
        let data = "1.5;-2\n\n3e2;4;99;100\n";
        let pts = read_positions(data.as_bytes()).unwrap();
        assert_eq!(pts, vec![NVec2::new(1.5, -2.0), NVec2::new(300.0, 4.0)]);
    }

    #[test]
    fn rejects_single_field_line() {
        let err = read_positions("1.0;2.0\n7.0\n".as_bytes()).unwrap_err();
        match err {
            SimError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_comma_decimal() {
        assert!(read_positions("1,5;2\n".as_bytes()).is_err());
    }
}
