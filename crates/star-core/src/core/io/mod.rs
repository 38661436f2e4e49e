//! Provides input/output functionality for plate layouts.
//!
//! Plates are persisted as `.star` records and can be exported as CSV tables
//! for spreadsheets and plotting tools. Every writer goes through a temporary
//! file that is renamed into place, so an interrupted write never leaves a
//! truncated file behind.

pub mod csv;
pub mod star;
pub mod traits;
