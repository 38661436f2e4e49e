use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FileYMode {
    Fixed,
    RowSpaced,
}

/// Motion settings read from a TOML file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub x_spacing: Option<f64>,
    pub y_spacing: Option<f64>,
    pub z_read: Option<f64>,
    pub z_safe: Option<f64>,
    pub offset: Option<f64>,
    pub y_mode: Option<FileYMode>,
    pub return_home: Option<bool>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading motion configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
