//! # Motion Module
//!
//! Turns a plate layout into instructions for a CNC-style positioner.
//!
//! - [`config`] - Physical plate geometry and program options (`GCodeParams`)
//! - [`gcode`] - The deterministic G-code generator
//!
//! Only the command sequence is produced here; sending it to hardware is left
//! to external tools.

pub mod config;
pub mod gcode;
