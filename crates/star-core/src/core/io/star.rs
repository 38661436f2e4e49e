//! The `.star` plate record.
//!
//! A `.star` file is a TOML document holding the plate dimensions and one
//! `[[wells]]` table per address in row-major order:
//!
//! ```toml
//! rows = 8
//! cols = 12
//!
//! [[wells]]
//! address = "A1"
//! kind = "concentration"
//! amount = 0.01
//! substance = "Caffeine"
//! color = "blue"
//!
//! [[wells]]
//! address = "A2"
//! ```
//!
//! Fields that are not set on a well are omitted rather than written as empty
//! strings, and read back as `None`.

use super::traits::PlateFile;
use crate::core::error::PlateError;
use crate::core::models::address::WellAddress;
use crate::core::models::plate::Plate;
use crate::core::models::well::{Well, WellValue};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const STAR_EXTENSION: &str = "star";

#[derive(Debug, Error)]
pub enum StarError {
    #[error("Plate file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Corrupt plate record: {0}")]
    Corrupt(String),
    #[error("Failed to encode plate record: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ValueKind {
    Concentration,
    Label,
    Blank,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WellRecord {
    address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<ValueKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    substance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlateRecord {
    rows: usize,
    cols: usize,
    #[serde(default)]
    wells: Vec<WellRecord>,
}

impl WellRecord {
    fn from_well(address: WellAddress, well: &Well) -> Self {
        let (kind, amount, text) = match &well.value {
            None => (None, None, None),
            Some(WellValue::Concentration(amount)) => {
                (Some(ValueKind::Concentration), Some(*amount), None)
            }
            Some(WellValue::Label(text)) => (Some(ValueKind::Label), None, Some(text.clone())),
            Some(WellValue::Blank) => (Some(ValueKind::Blank), None, None),
        };
        Self {
            address: address.to_string(),
            kind,
            amount,
            text,
            substance: well.substance.clone(),
            color: well.color.clone(),
        }
    }

    fn into_well(self) -> Result<Well, StarError> {
        let value = match (self.kind, self.amount, self.text) {
            (None, None, None) => None,
            (Some(ValueKind::Concentration), Some(amount), None) => {
                Some(WellValue::Concentration(amount))
            }
            (Some(ValueKind::Label), None, Some(text)) => Some(WellValue::Label(text)),
            (Some(ValueKind::Blank), None, None) => Some(WellValue::Blank),
            (kind, _, _) => {
                return Err(StarError::Corrupt(format!(
                    "well {} has fields that do not match its value kind {:?}",
                    self.address, kind
                )));
            }
        };
        Ok(Well {
            value,
            substance: self.substance,
            color: self.color,
        })
    }
}

/// Returns `name` with the `.star` extension appended unless already present.
pub fn star_path<P: AsRef<Path>>(name: P) -> PathBuf {
    let name = name.as_ref();
    if name.extension().is_some_and(|ext| ext == STAR_EXTENSION) {
        name.to_path_buf()
    } else {
        let mut path = name.as_os_str().to_owned();
        path.push(".");
        path.push(STAR_EXTENSION);
        PathBuf::from(path)
    }
}

pub struct StarFile;

impl PlateFile for StarFile {
    type Error = StarError;

    fn read_from(reader: &mut impl BufRead) -> Result<Plate, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let content = String::from_utf8(bytes)
            .map_err(|e| StarError::Corrupt(format!("record is not valid UTF-8: {}", e)))?;

        let record: PlateRecord =
            toml::from_str(&content).map_err(|e| StarError::Corrupt(e.to_string()))?;

        if record.rows == 0 || record.cols == 0 {
            return Err(StarError::Corrupt(
                PlateError::InvalidDimensions {
                    rows: record.rows,
                    cols: record.cols,
                }
                .to_string(),
            ));
        }
        // Checked before anything is sized from the declared dimensions.
        let expected = record.rows.checked_mul(record.cols);
        if expected != Some(record.wells.len()) {
            return Err(StarError::Corrupt(format!(
                "a {}x{} plate needs {} wells, but {} are listed",
                record.rows,
                record.cols,
                expected.map_or_else(|| "more than usize::MAX".to_string(), |n| n.to_string()),
                record.wells.len()
            )));
        }

        let mut slots: Vec<Option<Well>> = vec![None; record.wells.len()];
        for well_record in record.wells {
            let address: WellAddress = well_record.address.parse().map_err(|e| {
                StarError::Corrupt(format!("well address '{}': {}", well_record.address, e))
            })?;
            if address.row >= record.rows || address.col >= record.cols {
                return Err(StarError::Corrupt(format!(
                    "well {} lies outside the {}x{} plate",
                    address, record.rows, record.cols
                )));
            }
            let slot = &mut slots[address.row * record.cols + address.col];
            if slot.is_some() {
                return Err(StarError::Corrupt(format!("well {} is listed twice", address)));
            }
            *slot = Some(well_record.into_well()?);
        }

        let wells = slots.into_iter().flatten().collect();
        Plate::from_wells(record.rows, record.cols, wells)
            .map_err(|e| StarError::Corrupt(e.to_string()))
    }

    fn write_to(plate: &Plate, writer: &mut impl Write) -> Result<(), Self::Error> {
        let record = PlateRecord {
            rows: plate.rows(),
            cols: plate.cols(),
            wells: plate
                .iter_wells()
                .map(|(address, well)| WellRecord::from_well(address, well))
                .collect(),
        };
        let content = toml::to_string(&record)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Saves `plate` to `<name>.star`, overwriting any existing file.
///
/// # Return
///
/// The path that was written.
pub fn save<P: AsRef<Path>>(plate: &Plate, name: P) -> Result<PathBuf, StarError> {
    let path = star_path(name);
    StarFile::write_to_path(plate, &path)?;
    Ok(path)
}

/// Loads the plate stored at `<name>.star`.
///
/// # Errors
///
/// - [`StarError::NotFound`] if the file does not exist.
/// - [`StarError::Corrupt`] if it does not describe a complete, valid grid.
pub fn load_plate<P: AsRef<Path>>(name: P) -> Result<Plate, StarError> {
    let path = star_path(name);
    StarFile::read_from_path(&path).map_err(|e| match e {
        StarError::Io(err) if err.kind() == io::ErrorKind::NotFound => StarError::NotFound { path },
        other => other,
    })
}
