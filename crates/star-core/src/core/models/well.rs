use crate::core::units::readable_concentration;
use std::fmt;

/// The content assigned to a well.
#[derive(Debug, Clone, PartialEq)]
pub enum WellValue {
    /// A numeric amount in mM, as produced by a dilution or entered directly.
    ///
    /// Directly entered numbers are displayed the same way as dilution steps,
    /// rescaled to the largest readable unit (`0.005` shows as `5.00µM`).
    Concentration(f64),
    /// Free text such as a sample identifier.
    Label(String),
    /// An explicit blank, distinct from a well that was never filled.
    Blank,
}

impl WellValue {
    pub fn as_concentration(&self) -> Option<f64> {
        match self {
            WellValue::Concentration(amount) => Some(*amount),
            _ => None,
        }
    }
}

impl fmt::Display for WellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WellValue::Concentration(amount) => {
                let (display, unit) = readable_concentration(*amount);
                write!(f, "{:.2}{}", display, unit)
            }
            WellValue::Label(text) => f.write_str(text),
            WellValue::Blank => f.write_str("Blank"),
        }
    }
}

/// A single cell of a plate.
///
/// All fields are optional; a well with none of them set is empty. Wells are
/// owned by their [`Plate`](super::plate::Plate) and only change through its
/// fill operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Well {
    pub value: Option<WellValue>,
    pub substance: Option<String>,
    /// Display hint for visualizers (a color name or hex code).
    pub color: Option<String>,
}

impl Well {
    pub fn new(value: WellValue, substance: Option<&str>, color: Option<&str>) -> Self {
        Self {
            value: Some(value),
            substance: substance.map(str::to_string),
            color: color.map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.substance.is_none() && self.color.is_none()
    }

    pub fn concentration(&self) -> Option<f64> {
        self.value.as_ref().and_then(WellValue::as_concentration)
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Empty");
        }
        let mut parts = Vec::with_capacity(3);
        if let Some(substance) = &self.substance {
            parts.push(substance.clone());
        }
        if let Some(value) = &self.value {
            parts.push(value.to_string());
        }
        if let Some(color) = &self.color {
            parts.push(format!("[{}]", color));
        }
        f.write_str(&parts.join(" "))
    }
}
