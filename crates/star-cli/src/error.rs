use polarstar::core::io::csv::CsvExportError;
use polarstar::{GCodeError, PlateError, StarError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Plate(#[from] PlateError),

    #[error(transparent)]
    Storage(#[from] StarError),

    #[error(transparent)]
    GCode(#[from] GCodeError),

    #[error(transparent)]
    Export(#[from] CsvExportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
