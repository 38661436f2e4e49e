//! Scaling of raw concentrations for display.
//!
//! Concentrations are stored in millimolar. For labels they are rescaled to the
//! largest unit whose threshold they exceed, so `0.005` mM reads as `5 µM`.

const THRESHOLD: f64 = 9.0;

/// Converts a millimolar concentration to a `(value, unit)` pair for display.
pub fn readable_concentration(concentration: f64) -> (f64, &'static str) {
    if concentration > THRESHOLD * 1e-3 {
        (concentration, "mM")
    } else if concentration > THRESHOLD * 1e-6 {
        (concentration * 1e3, "µM")
    } else if concentration > THRESHOLD * 1e-9 {
        (concentration * 1e6, "nM")
    } else {
        (concentration * 1e9, "pM")
    }
}
