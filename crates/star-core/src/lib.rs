//! # POLARSTAR Core Library
//!
//! Models a laboratory microplate, fills its wells with substances and serial
//! dilutions, persists plate layouts, and emits the G-code a CNC-style
//! positioner follows to read every well.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** The plate data model (`Plate`, `Well`,
//!   `WellAddress`), the dilution series, concentration units, and the file
//!   formats (`.star` plate records and CSV well tables).
//!
//! - **[`motion`]: The Instruction Layer.** Physical plate geometry
//!   (`GCodeParams`) and the generator that turns a plate's layout into a
//!   deterministic G-code program.
//!
//! The library performs no logging and no device I/O; it only produces data
//! and files for other tools to consume.

pub mod core;
pub mod motion;

pub use crate::core::error::PlateError;
pub use crate::core::io::star::{StarError, load_plate};
pub use crate::core::models::address::WellAddress;
pub use crate::core::models::plate::Plate;
pub use crate::core::models::well::{Well, WellValue};
pub use crate::motion::config::{GCodeParams, GCodeParamsBuilder, YMode};
pub use crate::motion::gcode::{GCodeError, GCodeProgram, generate_gcode};
