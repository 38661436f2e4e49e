use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "STAR CLI - Lay out microplates, plan serial dilutions and generate G-code for automated well reading.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty plate and save it as <NAME>.star.
    New(NewArgs),
    /// Fill consecutive wells with a serial dilution.
    Dilute(DiluteArgs),
    /// Set the content of a single well, replacing whatever it held.
    Set(SetArgs),
    /// Reset a single well to empty.
    Clear(ClearArgs),
    /// Print the plate layout.
    Show(ShowArgs),
    /// Export every well as a CSV table.
    Export(ExportArgs),
    /// Generate the G-code program that reads every well of the plate.
    Gcode(GcodeArgs),
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::New(_) => "new",
            Commands::Dilute(_) => "dilute",
            Commands::Set(_) => "set",
            Commands::Clear(_) => "clear",
            Commands::Show(_) => "show",
            Commands::Export(_) => "export",
            Commands::Gcode(_) => "gcode",
        }
    }

    /// The plate file every subcommand operates on.
    pub fn plate(&self) -> &Path {
        match self {
            Commands::New(args) => &args.name,
            Commands::Dilute(args) => &args.name,
            Commands::Set(args) => &args.name,
            Commands::Clear(args) => &args.name,
            Commands::Show(args) => &args.name,
            Commands::Export(args) => &args.name,
            Commands::Gcode(args) => &args.name,
        }
    }
}

/// Arguments for the `new` subcommand.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Plate file name; `.star` is appended when missing.
    #[arg(required = true, value_name = "NAME")]
    pub name: PathBuf,

    /// Standard plate format by well count (e.g. 96, 384).
    #[arg(short, long, value_name = "WELLS", conflicts_with_all = ["rows", "cols"])]
    pub format: Option<String>,

    /// Number of rows for a custom plate.
    #[arg(long, value_name = "INT", requires = "cols")]
    pub rows: Option<usize>,

    /// Number of columns for a custom plate.
    #[arg(long, value_name = "INT", requires = "rows")]
    pub cols: Option<usize>,

    /// Overwrite an existing plate file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `dilute` subcommand.
#[derive(Args, Debug)]
pub struct DiluteArgs {
    /// Plate file name.
    #[arg(required = true, value_name = "NAME")]
    pub name: PathBuf,

    /// First well of the series (e.g. A1).
    #[arg(short, long, default_value = "A1", value_name = "WELL")]
    pub start: String,

    /// Concentration of the first well, in mM.
    #[arg(short, long, value_name = "FLOAT")]
    pub initial: f64,

    /// Factor between consecutive wells.
    #[arg(short, long, value_name = "FLOAT")]
    pub factor: f64,

    /// Number of wells in the series.
    #[arg(short = 'n', long, value_name = "INT")]
    pub count: usize,

    /// Name of the diluted substance.
    #[arg(long, value_name = "NAME")]
    pub substance: String,

    /// Display color for the substance.
    #[arg(long, value_name = "COLOR")]
    pub color: Option<String>,
}

/// Arguments for the `set` subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Plate file name.
    #[arg(required = true, value_name = "NAME")]
    pub name: PathBuf,

    /// Well to fill (e.g. B7).
    #[arg(required = true, value_name = "WELL")]
    pub well: String,

    #[command(flatten)]
    pub value: ValueArgs,

    /// Substance name.
    #[arg(long, value_name = "NAME")]
    pub substance: Option<String>,

    /// Display color.
    #[arg(long, value_name = "COLOR")]
    pub color: Option<String>,
}

/// Exactly one kind of well value.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ValueArgs {
    /// Numeric concentration, in mM.
    #[arg(long, value_name = "FLOAT")]
    pub concentration: Option<f64>,
    /// Free text label.
    #[arg(long, value_name = "TEXT")]
    pub label: Option<String>,
    /// Mark the well as an explicit blank.
    #[arg(long)]
    pub blank: bool,
}

/// Arguments for the `clear` subcommand.
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Plate file name.
    #[arg(required = true, value_name = "NAME")]
    pub name: PathBuf,

    /// Well to clear.
    #[arg(required = true, value_name = "WELL")]
    pub well: String,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Plate file name.
    #[arg(required = true, value_name = "NAME")]
    pub name: PathBuf,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Plate file name.
    #[arg(required = true, value_name = "NAME")]
    pub name: PathBuf,

    /// Destination CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `gcode` subcommand.
#[derive(Args, Debug, Default)]
pub struct GcodeArgs {
    /// Plate file name.
    #[arg(required = true, value_name = "NAME")]
    pub name: PathBuf,

    /// Destination G-code file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Motion configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the distance between columns, in mm.
    #[arg(long, value_name = "FLOAT")]
    pub x_spacing: Option<f64>,

    /// Override the distance between rows, in mm.
    #[arg(long, value_name = "FLOAT")]
    pub y_spacing: Option<f64>,

    /// Override the reading depth, in mm.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub z_read: Option<f64>,

    /// Override the safe travel depth, in mm.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub z_safe: Option<f64>,

    /// Override the Y calibration offset, in mm.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub offset: Option<f64>,

    /// Spread rows along Y (y = offset + row * y-spacing) instead of a fixed Y.
    #[arg(long)]
    pub row_spaced: bool,

    /// Append a return-to-origin and end-of-program block.
    #[arg(long)]
    pub return_home: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S offset=-80
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
