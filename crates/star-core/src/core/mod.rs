//! # Core Module
//!
//! The data model and file formats of a microplate layout.
//!
//! - **Plate Representation** ([`models`]) - Well addresses, wells, plates and standard formats
//! - **Dilution Planning** ([`dilution`]) - Geometric concentration series
//! - **Units** ([`units`]) - Human-readable concentration scaling
//! - **File I/O** ([`io`]) - `.star` plate records and CSV well tables
//! - **Errors** ([`error`]) - Validation failures raised by plate operations

pub mod dilution;
pub mod error;
pub mod io;
pub mod models;
pub mod units;
