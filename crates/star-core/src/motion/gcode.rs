use super::config::{GCodeParams, YMode};
use crate::core::io::traits::write_atomically;
use crate::core::models::address::WellAddress;
use crate::core::models::plate::Plate;
use nalgebra::Point3;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

const HEADER: [&str; 2] = ["G21; Set units to millimeters", "G90; Use absolute positioning"];
const FOOTER: [&str; 3] = ["G0 X0 Y0; Return", "G0 Z0; Return", "M30; End of program"];

#[derive(Debug, Error)]
pub enum GCodeError {
    #[error("Invalid {axis} spacing {value}: must be a finite number greater than zero")]
    InvalidSpacing { axis: char, value: f64 },

    #[error("Invalid value for '{parameter}': {value} is not a finite number")]
    InvalidParameter { parameter: &'static str, value: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The positions used to read one well.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadStop {
    pub address: WellAddress,
    /// Safe-height position directly above the well.
    pub above: Point3<f64>,
    /// Lowered reading position.
    pub read: Point3<f64>,
}

/// A generated G-code program for one plate.
///
/// The program depends only on the plate dimensions and the parameters; the
/// well contents never change the motion path.
#[derive(Debug, Clone, PartialEq)]
pub struct GCodeProgram {
    lines: Vec<String>,
    stops: Vec<ReadStop>,
    return_home: bool,
}

/// Avoids printing `-0.00` for coordinates that round to zero.
fn mm(value: f64) -> f64 {
    if format!("{:.2}", value) == "-0.00" {
        0.0
    } else {
        value
    }
}

fn validate(params: &GCodeParams) -> Result<(), GCodeError> {
    for (axis, value) in [('X', params.x_spacing), ('Y', params.y_spacing)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(GCodeError::InvalidSpacing { axis, value });
        }
    }
    for (parameter, value) in [
        ("z_read", params.z_read),
        ("z_safe", params.z_safe),
        ("offset", params.offset),
    ] {
        if !value.is_finite() {
            return Err(GCodeError::InvalidParameter { parameter, value });
        }
    }
    Ok(())
}

impl GCodeProgram {
    /// Builds the program visiting every well of `plate` in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`GCodeError::InvalidSpacing`] if either spacing is not a
    /// positive finite number, and [`GCodeError::InvalidParameter`] for a
    /// non-finite height or offset.
    pub fn for_plate(plate: &Plate, params: &GCodeParams) -> Result<Self, GCodeError> {
        validate(params)?;

        let safe_z = mm(-params.z_safe);
        let read_z = mm(-params.z_read);

        let mut lines: Vec<String> = HEADER.iter().map(|line| line.to_string()).collect();
        let mut stops = Vec::with_capacity(plate.well_count());

        for (address, _) in plate.iter_wells() {
            let x = mm(address.col as f64 * params.x_spacing);
            let y = match params.y_mode {
                YMode::Fixed => mm(params.offset),
                YMode::RowSpaced => mm(params.offset + address.row as f64 * params.y_spacing),
            };

            lines.push(format!(
                "G0 X{:.2} Y{:.2} Z{:.2}; Move to above well at ({}, {})",
                x, y, safe_z, address.row, address.col
            ));
            lines.push(format!("G0 Z{:.2}; Lower to reading height", read_z));
            lines.push(format!("Read well at {}", address));
            lines.push(format!("G0 Z{:.2}; Raise back to safe height", safe_z));

            stops.push(ReadStop {
                address,
                above: Point3::new(x, y, safe_z),
                read: Point3::new(x, y, read_z),
            });
        }

        if params.return_home {
            lines.extend(FOOTER.iter().map(|line| line.to_string()));
        }

        Ok(Self {
            lines,
            stops,
            return_home: params.return_home,
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn stops(&self) -> &[ReadStop] {
        &self.stops
    }

    /// Every commanded position in order, starting from the machine origin.
    pub fn toolpath(&self) -> Vec<Point3<f64>> {
        let mut path = Vec::with_capacity(self.stops.len() * 3 + 3);
        path.push(Point3::origin());
        for stop in &self.stops {
            path.push(stop.above);
            path.push(stop.read);
            path.push(stop.above);
        }
        if self.return_home {
            if let Some(last) = path.last().copied() {
                path.push(Point3::new(0.0, 0.0, last.z));
            }
            path.push(Point3::origin());
        }
        path
    }

    /// Total straight-line travel of the toolpath in millimeters.
    pub fn travel_distance(&self) -> f64 {
        self.toolpath()
            .windows(2)
            .map(|segment| nalgebra::distance(&segment[0], &segment[1]))
            .sum()
    }

    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }

    /// Writes the program to `path`, replacing any existing file.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), GCodeError> {
        write_atomically(path, |writer| self.write_to(writer).map_err(GCodeError::from))
    }
}

impl fmt::Display for GCodeProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Renders the program for `plate` as text without touching the filesystem.
pub fn render(plate: &Plate, params: &GCodeParams) -> Result<String, GCodeError> {
    Ok(GCodeProgram::for_plate(plate, params)?.to_string())
}

/// Generates the program for `plate` and writes it to `path`.
///
/// Calling this twice with the same plate dimensions and parameters produces
/// byte-identical files.
pub fn generate_gcode<P: AsRef<Path>>(
    plate: &Plate,
    params: &GCodeParams,
    path: P,
) -> Result<GCodeProgram, GCodeError> {
    let program = GCodeProgram::for_plate(plate, params)?;
    program.write_to_path(path)?;
    Ok(program)
}
