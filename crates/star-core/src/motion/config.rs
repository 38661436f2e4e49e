use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// How the Y coordinate of a well is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YMode {
    /// Every well is read at `y = offset`.
    #[default]
    Fixed,
    /// Rows are spread along Y: `y = offset + row * y_spacing`.
    RowSpaced,
}

/// Geometry and options for G-code generation. Lengths are in millimeters.
///
/// Heights (`z_read`, `z_safe`) are depths relative to the machine's Z origin
/// and are emitted negated.
#[derive(Debug, Clone, PartialEq)]
pub struct GCodeParams {
    pub x_spacing: f64,
    pub y_spacing: f64,
    pub z_read: f64,
    pub z_safe: f64,
    /// Y calibration offset applied to every well.
    pub offset: f64,
    pub y_mode: YMode,
    /// Append a return-to-origin and end-of-program block.
    pub return_home: bool,
}

impl Default for GCodeParams {
    fn default() -> Self {
        Self {
            x_spacing: 9.0,
            y_spacing: 9.0,
            z_read: -5.0,
            z_safe: 0.0,
            offset: -90.0,
            y_mode: YMode::Fixed,
            return_home: false,
        }
    }
}

#[derive(Default)]
pub struct GCodeParamsBuilder {
    x_spacing: Option<f64>,
    y_spacing: Option<f64>,
    z_read: Option<f64>,
    z_safe: Option<f64>,
    offset: Option<f64>,
    y_mode: Option<YMode>,
    return_home: Option<bool>,
}

impl GCodeParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x_spacing(mut self, spacing: f64) -> Self {
        self.x_spacing = Some(spacing);
        self
    }
    pub fn y_spacing(mut self, spacing: f64) -> Self {
        self.y_spacing = Some(spacing);
        self
    }
    pub fn z_read(mut self, height: f64) -> Self {
        self.z_read = Some(height);
        self
    }
    pub fn z_safe(mut self, height: f64) -> Self {
        self.z_safe = Some(height);
        self
    }
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }
    pub fn y_mode(mut self, mode: YMode) -> Self {
        self.y_mode = Some(mode);
        self
    }
    pub fn return_home(mut self, enabled: bool) -> Self {
        self.return_home = Some(enabled);
        self
    }

    /// Builds the parameters. Spacings, read height and offset are required;
    /// the remaining options fall back to [`GCodeParams::default`].
    pub fn build(self) -> Result<GCodeParams, ConfigError> {
        let defaults = GCodeParams::default();
        Ok(GCodeParams {
            x_spacing: self
                .x_spacing
                .ok_or(ConfigError::MissingParameter("x_spacing"))?,
            y_spacing: self
                .y_spacing
                .ok_or(ConfigError::MissingParameter("y_spacing"))?,
            z_read: self.z_read.ok_or(ConfigError::MissingParameter("z_read"))?,
            offset: self.offset.ok_or(ConfigError::MissingParameter("offset"))?,
            z_safe: self.z_safe.unwrap_or(defaults.z_safe),
            y_mode: self.y_mode.unwrap_or(defaults.y_mode),
            return_home: self.return_home.unwrap_or(defaults.return_home),
        })
    }
}
