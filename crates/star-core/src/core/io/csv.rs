//! CSV export of a plate's wells.
//!
//! One record per well in row-major order, with unset fields left as empty
//! cells. Concentrations are written both raw and in the readable unit used
//! for labels, which is what plotting tools and spreadsheets usually want.

use super::traits::write_atomically;
use crate::core::models::plate::Plate;
use crate::core::models::well::WellValue;
use crate::core::units::readable_concentration;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Serialize)]
struct WellRow<'a> {
    address: String,
    row: usize,
    col: usize,
    substance: Option<&'a str>,
    kind: Option<&'static str>,
    value: Option<String>,
    display_value: Option<String>,
    unit: Option<&'static str>,
    color: Option<&'a str>,
}

/// Writes every well of `plate` as CSV.
pub fn write_wells<W: Write>(plate: &Plate, writer: W) -> Result<(), CsvExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (address, well) in plate.iter_wells() {
        let (kind, value, display_value, unit) = match &well.value {
            None => (None, None, None, None),
            Some(WellValue::Concentration(amount)) => {
                let (display, unit) = readable_concentration(*amount);
                (
                    Some("concentration"),
                    Some(amount.to_string()),
                    Some(format!("{:.2}", display)),
                    Some(unit),
                )
            }
            Some(WellValue::Label(text)) => (Some("label"), Some(text.clone()), None, None),
            Some(WellValue::Blank) => (Some("blank"), None, None, None),
        };
        csv_writer.serialize(WellRow {
            address: address.to_string(),
            row: address.row,
            col: address.col,
            substance: well.substance.as_deref(),
            kind,
            value,
            display_value,
            unit,
            color: well.color.as_deref(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the CSV table to `path`, replacing any existing file.
pub fn export_wells<P: AsRef<Path>>(plate: &Plate, path: P) -> Result<(), CsvExportError> {
    write_atomically(path, |writer| write_wells(plate, writer))
}
