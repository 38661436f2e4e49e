mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    let log_settings = logging::LogSettings::from_flags(cli.verbose, cli.quiet, cli.log_file.clone());
    logging::setup_logging(&log_settings)?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| {
        CliError::Other(anyhow::anyhow!("Failed to install error report hook: {}", e))
    })?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 STAR CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let span = logging::command_span(cli.command.name(), cli.command.plate());
    let _entered = span.enter();

    let command_result = match cli.command {
        Commands::New(args) => {
            info!("Dispatching to 'new' command.");
            commands::new::run(args)
        }
        Commands::Dilute(args) => {
            info!("Dispatching to 'dilute' command.");
            commands::fill::run_dilute(args)
        }
        Commands::Set(args) => {
            info!("Dispatching to 'set' command.");
            commands::fill::run_set(args)
        }
        Commands::Clear(args) => {
            info!("Dispatching to 'clear' command.");
            commands::fill::run_clear(args)
        }
        Commands::Show(args) => {
            info!("Dispatching to 'show' command.");
            commands::show::run_show(args)
        }
        Commands::Export(args) => {
            info!("Dispatching to 'export' command.");
            commands::show::run_export(args)
        }
        Commands::Gcode(args) => {
            info!("Dispatching to 'gcode' command.");
            commands::gcode::run(args)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
