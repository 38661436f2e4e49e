use crate::error::{CliError, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{Span, Subscriber, info_span};
use tracing_subscriber::{
    Layer,
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
    registry::LookupSpan,
};

/// Logging settings derived from the global CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl LogSettings {
    /// `-q` silences everything; otherwise each `-v` raises the level one step
    /// above WARN.
    pub fn from_flags(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Self {
        let level = if quiet {
            LevelFilter::OFF
        } else {
            match verbosity {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };
        Self { level, log_file }
    }
}

/// Span wrapping one command run, so every record names the plate it touched.
pub fn command_span(command: &'static str, plate: &Path) -> Span {
    info_span!("star", command, plate = %plate.display())
}

/// Opens `path` for appending, so consecutive runs share one log.
fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(CliError::Io)
}

/// Plain-text layer for log files: no colors, full span context on every line.
fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
}

pub fn setup_logging(settings: &LogSettings) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(settings.level)
        .with(stderr_layer);

    let installed = match &settings.log_file {
        Some(path) => subscriber.with(file_layer(open_log_file(path)?)).try_init(),
        None => subscriber.try_init(),
    };

    installed.map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}
