//! # Core Models Module
//!
//! Data structures representing a microplate and its contents.
//!
//! ## Key Components
//!
//! - [`address`] - Conversion between well identifiers like `"B7"` and zero-based grid indices
//! - [`well`] - A single grid cell with its optional value, substance and display color
//! - [`plate`] - The fixed-size rectangular grid of wells and its fill operations
//! - [`format`] - Registry of standard plate sizes
//!
//! ## Usage
//!
//! ```ignore
//! use polarstar::core::models::{plate::Plate, well::WellValue};
//!
//! let mut plate = Plate::new(8, 12)?;
//! plate.fill_custom("B2", WellValue::Concentration(2.5), Some("NaCl"), Some("green"))?;
//! plate.fill_serial_dilutions("A1", 10e-3, 2.0, 8, "Caffeine", Some("blue"))?;
//! ```

pub mod address;
pub mod format;
pub mod plate;
pub mod well;
