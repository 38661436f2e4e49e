use super::models::address::AddressError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlateError {
    #[error("Invalid plate dimensions {rows}x{cols}: both must be greater than zero")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Invalid well address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("Well {address} lies outside the {rows}x{cols} plate")]
    OutOfBounds {
        address: String,
        rows: usize,
        cols: usize,
    },

    #[error(
        "Series of {requested} wells starting at {start} does not fit: only {available} wells remain"
    )]
    SeriesOutOfBounds {
        start: String,
        requested: usize,
        available: usize,
    },

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("Unknown plate format '{0}'")]
    UnknownFormat(String),
}

impl PlateError {
    /// True for both single-well and series range failures.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            PlateError::OutOfBounds { .. } | PlateError::SeriesOutOfBounds { .. }
        )
    }
}
