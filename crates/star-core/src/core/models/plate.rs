use super::address::WellAddress;
use super::format;
use super::well::{Well, WellValue};
use crate::core::dilution::DilutionSeries;
use crate::core::error::PlateError;
use crate::core::io::star::{self, StarError};
use std::fmt;
use std::path::{Path, PathBuf};

/// A rectangular microplate of `rows × cols` wells.
///
/// Wells are stored densely in row-major order, so every address inside the
/// grid always has an entry and no address outside it can be reached. The
/// dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Plate {
    rows: usize,
    cols: usize,
    wells: Vec<Well>,
}

impl Plate {
    /// Creates a plate with every well empty.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::InvalidDimensions`] if either dimension is zero or
    /// the grid is larger than a single allocation can hold.
    pub fn new(rows: usize, cols: usize) -> Result<Self, PlateError> {
        let max_wells = isize::MAX as usize / std::mem::size_of::<Well>();
        let count = match rows.checked_mul(cols) {
            Some(count) if rows > 0 && cols > 0 && count <= max_wells => count,
            _ => return Err(PlateError::InvalidDimensions { rows, cols }),
        };
        Ok(Self {
            rows,
            cols,
            wells: vec![Well::default(); count],
        })
    }

    /// Creates an empty plate in a standard format such as `"96"` or `"384-well"`.
    pub fn standard(name: &str) -> Result<Self, PlateError> {
        let format =
            format::lookup(name).ok_or_else(|| PlateError::UnknownFormat(name.to_string()))?;
        Self::new(format.rows, format.cols)
    }

    /// Rebuilds a plate from a complete row-major well grid.
    pub(crate) fn from_wells(
        rows: usize,
        cols: usize,
        wells: Vec<Well>,
    ) -> Result<Self, PlateError> {
        let mut plate = Self::new(rows, cols)?;
        if wells.len() != plate.wells.len() {
            return Err(PlateError::InvalidParameter {
                parameter: "wells",
                reason: format!(
                    "expected {} wells for a {}x{} plate, found {}",
                    plate.wells.len(),
                    rows,
                    cols,
                    wells.len()
                ),
            });
        }
        plate.wells = wells;
        Ok(plate)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn well_count(&self) -> usize {
        self.wells.len()
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    fn address_of(&self, index: usize) -> WellAddress {
        WellAddress::new(index / self.cols, index % self.cols)
    }

    /// Parses `pos` and checks it against the plate bounds.
    fn resolve(&self, pos: &str) -> Result<(WellAddress, usize), PlateError> {
        let address: WellAddress = pos.parse()?;
        let index = self
            .index_of(address.row, address.col)
            .ok_or_else(|| PlateError::OutOfBounds {
                address: address.to_string(),
                rows: self.rows,
                cols: self.cols,
            })?;
        Ok((address, index))
    }

    /// Returns the well at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::InvalidAddress`] for a malformed identifier and
    /// [`PlateError::OutOfBounds`] for an address outside the plate.
    pub fn get_well(&self, pos: &str) -> Result<&Well, PlateError> {
        let (_, index) = self.resolve(pos)?;
        Ok(&self.wells[index])
    }

    pub fn well_at(&self, row: usize, col: usize) -> Option<&Well> {
        self.index_of(row, col).map(|index| &self.wells[index])
    }

    /// Iterates over every well in row-major order.
    ///
    /// This is the read-only view visualizers consume; each call starts a new
    /// pass over the grid.
    pub fn iter_wells(&self) -> impl Iterator<Item = (WellAddress, &Well)> {
        self.wells
            .iter()
            .enumerate()
            .map(|(index, well)| (self.address_of(index), well))
    }

    /// Iterates over the wells that hold any content, in row-major order.
    pub fn filled_wells(&self) -> impl Iterator<Item = (WellAddress, &Well)> {
        self.iter_wells().filter(|(_, well)| !well.is_empty())
    }

    /// Distinct substances with the first color seen for each, in row-major order.
    pub fn substances(&self) -> Vec<(&str, Option<&str>)> {
        let mut legend: Vec<(&str, Option<&str>)> = Vec::new();
        for (_, well) in self.iter_wells() {
            if let Some(substance) = well.substance.as_deref() {
                if !legend.iter().any(|(name, _)| *name == substance) {
                    legend.push((substance, well.color.as_deref()));
                }
            }
        }
        legend
    }

    /// Replaces the whole content of the well at `pos`.
    ///
    /// Any previous substance or color is discarded unless supplied again.
    pub fn fill_custom(
        &mut self,
        pos: &str,
        value: WellValue,
        substance: Option<&str>,
        color: Option<&str>,
    ) -> Result<WellAddress, PlateError> {
        let (address, index) = self.resolve(pos)?;
        self.wells[index] = Well::new(value, substance, color);
        Ok(address)
    }

    /// Fills consecutive wells with a serial dilution, starting at `start_pos`
    /// and advancing in row-major order.
    ///
    /// The whole series is validated before any well is written, so a failed
    /// call leaves the plate unchanged.
    ///
    /// # Return
    ///
    /// The addresses that were filled, in series order.
    ///
    /// # Errors
    ///
    /// - [`PlateError::InvalidParameter`] for a zero or negative factor, a zero
    ///   count, or a negative initial concentration.
    /// - [`PlateError::InvalidAddress`] / [`PlateError::OutOfBounds`] for a bad
    ///   start position.
    /// - [`PlateError::SeriesOutOfBounds`] if fewer than `num_dilutions` wells
    ///   remain from the start position to the last well.
    pub fn fill_serial_dilutions(
        &mut self,
        start_pos: &str,
        initial_concentration: f64,
        dilution_factor: f64,
        num_dilutions: usize,
        substance: &str,
        color: Option<&str>,
    ) -> Result<Vec<WellAddress>, PlateError> {
        let series = DilutionSeries::new(initial_concentration, dilution_factor, num_dilutions)?;
        let (start, start_index) = self.resolve(start_pos)?;

        let available = self.wells.len() - start_index;
        if series.len() > available {
            return Err(PlateError::SeriesOutOfBounds {
                start: start.to_string(),
                requested: series.len(),
                available,
            });
        }

        let mut filled = Vec::with_capacity(series.len());
        for (offset, concentration) in series.concentrations().into_iter().enumerate() {
            let index = start_index + offset;
            self.wells[index] = Well::new(
                WellValue::Concentration(concentration),
                Some(substance),
                color,
            );
            filled.push(self.address_of(index));
        }
        Ok(filled)
    }

    /// Resets the well at `pos` to empty.
    pub fn clear_well(&mut self, pos: &str) -> Result<WellAddress, PlateError> {
        let (address, index) = self.resolve(pos)?;
        self.wells[index] = Well::default();
        Ok(address)
    }

    /// Writes the plate to `<name>.star`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, name: P) -> Result<PathBuf, StarError> {
        star::save(self, name)
    }

    /// Reads a plate previously written by [`Plate::save`].
    pub fn load<P: AsRef<Path>>(name: P) -> Result<Self, StarError> {
        star::load_plate(name)
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.wells.chunks(self.cols) {
            let cells: Vec<String> = row.iter().map(Well::to_string).collect();
            writeln!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_plate() -> Plate {
        let mut plate = Plate::new(2, 3).unwrap();
        plate
            .fill_custom("A1", WellValue::Concentration(1.5), Some("Substance1"), Some("blue"))
            .unwrap();
        plate
            .fill_serial_dilutions("A2", 1.0, 2.0, 2, "Substance2", Some("red"))
            .unwrap();
        plate
    }

    #[test]
    fn new_plate_has_every_well_empty() {
        let plate = Plate::new(8, 12).unwrap();
        assert_eq!(plate.rows(), 8);
        assert_eq!(plate.cols(), 12);
        assert_eq!(plate.well_count(), 96);
        assert_eq!(plate.iter_wells().count(), 96);
        assert!(plate.iter_wells().all(|(_, well)| well.is_empty()));
        assert_eq!(plate.get_well("H12").unwrap(), &Well::default());
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert_eq!(
            Plate::new(0, 12),
            Err(PlateError::InvalidDimensions { rows: 0, cols: 12 })
        );
        assert_eq!(
            Plate::new(8, 0),
            Err(PlateError::InvalidDimensions { rows: 8, cols: 0 })
        );
        assert!(matches!(
            Plate::new(usize::MAX, 2),
            Err(PlateError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn new_rejects_grids_larger_than_one_allocation() {
        assert!(matches!(
            Plate::new(usize::MAX / 2, 2),
            Err(PlateError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn standard_builds_named_formats() {
        let plate = Plate::standard("384").unwrap();
        assert_eq!((plate.rows(), plate.cols()), (16, 24));
        assert_eq!(
            Plate::standard("97"),
            Err(PlateError::UnknownFormat("97".to_string()))
        );
    }

    #[test]
    fn get_well_rejects_addresses_outside_the_plate() {
        let plate = Plate::new(8, 12).unwrap();
        for pos in ["I1", "A13", "AA1", "Z99"] {
            match plate.get_well(pos) {
                Err(PlateError::OutOfBounds { rows, cols, .. }) => {
                    assert_eq!((rows, cols), (8, 12))
                }
                other => panic!("expected out of bounds for {}, got {:?}", pos, other),
            }
        }
    }

    #[test]
    fn get_well_rejects_malformed_addresses() {
        let plate = Plate::new(8, 12).unwrap();
        assert!(matches!(
            plate.get_well("1A"),
            Err(PlateError::InvalidAddress(_))
        ));
    }

    #[test]
    fn iter_wells_walks_row_major_and_restarts() {
        let plate = Plate::new(2, 3).unwrap();
        let labels: Vec<String> = plate.iter_wells().map(|(a, _)| a.to_string()).collect();
        assert_eq!(labels, ["A1", "A2", "A3", "B1", "B2", "B3"]);
        assert_eq!(plate.iter_wells().count(), 6);
    }

    #[test]
    fn fill_custom_sets_the_target_well_only() {
        let mut plate = Plate::new(2, 3).unwrap();
        let address = plate
            .fill_custom("B2", WellValue::Concentration(2.5), Some("Substance2"), Some("green"))
            .unwrap();
        assert_eq!(address, WellAddress::new(1, 1));

        let well = plate.well_at(1, 1).unwrap();
        assert_eq!(well.concentration(), Some(2.5));
        assert_eq!(well.substance.as_deref(), Some("Substance2"));
        assert_eq!(well.color.as_deref(), Some("green"));
        assert_eq!(plate.filled_wells().count(), 1);
    }

    #[test]
    fn fill_custom_replaces_prior_content_entirely() {
        let mut plate = Plate::new(2, 3).unwrap();
        plate
            .fill_custom("A1", WellValue::Concentration(1.0), Some("Old"), Some("red"))
            .unwrap();
        plate
            .fill_custom("A1", WellValue::Label("ctrl".into()), None, None)
            .unwrap();

        let well = plate.get_well("A1").unwrap();
        assert_eq!(well.value, Some(WellValue::Label("ctrl".into())));
        assert_eq!(well.substance, None);
        assert_eq!(well.color, None);
    }

    #[test]
    fn fill_custom_out_of_bounds_leaves_plate_unchanged() {
        let mut plate = Plate::new(8, 12).unwrap();
        let before = plate.clone();
        let result = plate.fill_custom("I1", WellValue::Blank, Some("Test"), Some("red"));
        assert!(result.unwrap_err().is_out_of_bounds());
        assert_eq!(plate, before);
    }

    #[test]
    fn serial_dilution_fills_consecutive_wells_in_the_first_row() {
        let mut plate = Plate::new(8, 12).unwrap();
        let filled = plate
            .fill_serial_dilutions("A1", 10e-3, 2.0, 8, "Caffeine", Some("blue"))
            .unwrap();

        let labels: Vec<String> = filled.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8"]);

        let mut expected = 10e-3;
        for col in 0..8 {
            let well = plate.well_at(0, col).unwrap();
            assert_eq!(well.concentration(), Some(expected));
            assert_eq!(well.substance.as_deref(), Some("Caffeine"));
            assert_eq!(well.color.as_deref(), Some("blue"));
            expected /= 2.0;
        }
        assert_eq!(plate.well_at(0, 7).unwrap().concentration(), Some(10e-3 / 128.0));
        assert_eq!(plate.filled_wells().count(), 8);
    }

    #[test]
    fn serial_dilution_wraps_to_the_next_row() {
        let mut plate = Plate::new(2, 3).unwrap();
        plate
            .fill_serial_dilutions("A1", 1.0, 10.0, 6, "Substance", Some("blue"))
            .unwrap();
        let concentrations: Vec<f64> = plate
            .iter_wells()
            .filter_map(|(_, well)| well.concentration())
            .collect();
        assert_eq!(concentrations.len(), 6);
        assert_eq!(plate.well_at(1, 0).unwrap().concentration(), Some(1.0 / 1000.0));
        assert!(concentrations.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn serial_dilution_can_end_exactly_at_the_last_well() {
        let mut plate = Plate::new(8, 12).unwrap();
        let filled = plate
            .fill_serial_dilutions("H11", 1.0, 2.0, 2, "Tail", None)
            .unwrap();
        assert_eq!(filled.last().unwrap().to_string(), "H12");
    }

    #[test]
    fn serial_dilution_past_the_last_well_is_all_or_nothing() {
        let mut plate = Plate::new(8, 12).unwrap();
        let before = plate.clone();
        let result = plate.fill_serial_dilutions("H12", 1.0, 2.0, 2, "Test", Some("blue"));
        assert_eq!(
            result,
            Err(PlateError::SeriesOutOfBounds {
                start: "H12".to_string(),
                requested: 2,
                available: 1,
            })
        );
        assert_eq!(plate, before);

        let result = plate.fill_serial_dilutions("A1", 1.0, 2.0, 97, "Test", None);
        assert!(result.unwrap_err().is_out_of_bounds());
        assert_eq!(plate, before);
    }

    #[test]
    fn serial_dilution_from_a_start_outside_the_plate_fails() {
        let mut plate = Plate::new(8, 12).unwrap();
        let before = plate.clone();
        let result = plate.fill_serial_dilutions("L12", 1.0, 2.0, 2, "Test", Some("blue"));
        assert!(result.unwrap_err().is_out_of_bounds());
        assert_eq!(plate, before);
    }

    #[test]
    fn serial_dilution_validates_parameters_before_writing() {
        let mut plate = Plate::new(8, 12).unwrap();
        let before = plate.clone();
        for (initial, factor, count) in [(1.0, 0.0, 3), (1.0, 2.0, 0), (-1.0, 2.0, 3)] {
            let result = plate.fill_serial_dilutions("A1", initial, factor, count, "X", None);
            assert!(matches!(result, Err(PlateError::InvalidParameter { .. })));
        }
        assert_eq!(plate, before);
    }

    #[test]
    fn clear_well_resets_content() {
        let mut plate = filled_plate();
        plate.clear_well("A1").unwrap();
        assert!(plate.get_well("A1").unwrap().is_empty());
        assert_eq!(plate.filled_wells().count(), 2);
    }

    #[test]
    fn substances_lists_each_name_once_with_its_color() {
        let plate = filled_plate();
        assert_eq!(
            plate.substances(),
            vec![("Substance1", Some("blue")), ("Substance2", Some("red"))]
        );
    }

    #[test]
    fn display_renders_one_line_per_row() {
        let text = filled_plate().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Substance1"));
        assert!(lines[0].contains("Substance2"));
        assert_eq!(lines[1], "Empty | Empty | Empty");
    }

    #[test]
    fn save_and_load_round_trip_through_a_star_file() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("layout");
        let plate = filled_plate();

        let path = plate.save(&name).unwrap();
        assert_eq!(path, dir.path().join("layout.star"));
        assert_eq!(Plate::load(&name).unwrap(), plate);
    }

    #[test]
    fn from_wells_requires_a_complete_grid() {
        assert!(Plate::from_wells(2, 2, vec![Well::default(); 3]).is_err());
        let plate = Plate::from_wells(2, 2, vec![Well::default(); 4]).unwrap();
        assert_eq!(plate.well_count(), 4);
    }
}
