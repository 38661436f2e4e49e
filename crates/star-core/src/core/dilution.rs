//! Geometric concentration series for serial dilutions.

use super::error::PlateError;

/// Computes `count` concentrations `initial / factor^i` for `i = 0..count`.
///
/// The divisor is accumulated by repeated multiplication, so identical inputs
/// always produce bit-identical output.
pub fn generate(initial: f64, factor: f64, count: usize) -> Vec<f64> {
    let mut divisor = 1.0;
    (0..count)
        .map(|_| {
            let concentration = initial / divisor;
            divisor *= factor;
            concentration
        })
        .collect()
}

/// A validated dilution plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DilutionSeries {
    initial: f64,
    factor: f64,
    count: usize,
}

impl DilutionSeries {
    /// # Errors
    ///
    /// Returns [`PlateError::InvalidParameter`] if `initial` is negative or not
    /// finite, `factor` is not a finite positive number, or `count` is zero.
    pub fn new(initial: f64, factor: f64, count: usize) -> Result<Self, PlateError> {
        if !initial.is_finite() || initial < 0.0 {
            return Err(PlateError::InvalidParameter {
                parameter: "initial_concentration",
                reason: format!("must be a finite, non-negative number (got {})", initial),
            });
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PlateError::InvalidParameter {
                parameter: "dilution_factor",
                reason: format!("must be a finite number greater than zero (got {})", factor),
            });
        }
        if count == 0 {
            return Err(PlateError::InvalidParameter {
                parameter: "num_dilutions",
                reason: "at least one dilution is required".to_string(),
            });
        }
        Ok(Self {
            initial,
            factor,
            count,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn concentrations(&self) -> Vec<f64> {
        generate(self.initial, self.factor, self.count)
    }
}
