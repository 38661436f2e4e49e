use super::file::{FileConfig, FileYMode};
use crate::cli::GcodeArgs;
use crate::error::{CliError, Result};
use polarstar::{GCodeParams, GCodeParamsBuilder, YMode};
use tracing::debug;

/// Resolves motion parameters: CLI flags, then `--set` overrides, then the
/// config file, then built-in defaults.
pub fn build_gcode_params(args: &GcodeArgs) -> Result<GCodeParams> {
    let defaults = GCodeParams::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let file_config = apply_set_values(file_config, &args.set_values)?;
    debug!("Motion configuration after overrides: {:?}", file_config);

    let y_mode = if args.row_spaced {
        YMode::RowSpaced
    } else {
        match file_config.y_mode {
            Some(FileYMode::RowSpaced) => YMode::RowSpaced,
            Some(FileYMode::Fixed) => YMode::Fixed,
            None => defaults.y_mode,
        }
    };
    let return_home = args.return_home
        || file_config
            .return_home
            .unwrap_or(defaults.return_home);

    GCodeParamsBuilder::new()
        .x_spacing(
            args.x_spacing
                .or(file_config.x_spacing)
                .unwrap_or(defaults.x_spacing),
        )
        .y_spacing(
            args.y_spacing
                .or(file_config.y_spacing)
                .unwrap_or(defaults.y_spacing),
        )
        .z_read(args.z_read.or(file_config.z_read).unwrap_or(defaults.z_read))
        .z_safe(args.z_safe.or(file_config.z_safe).unwrap_or(defaults.z_safe))
        .offset(args.offset.or(file_config.offset).unwrap_or(defaults.offset))
        .y_mode(y_mode)
        .return_home(return_home)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn parse_float(key: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid float value for {}: {}", key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
            CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            ))
        })?;

        match key.trim() {
            "x-spacing" => config.x_spacing = Some(parse_float(key, value_str)?),
            "y-spacing" => config.y_spacing = Some(parse_float(key, value_str)?),
            "z-read" => config.z_read = Some(parse_float(key, value_str)?),
            "z-safe" => config.z_safe = Some(parse_float(key, value_str)?),
            "offset" => config.offset = Some(parse_float(key, value_str)?),
            "y-mode" => {
                config.y_mode = Some(match value_str.trim() {
                    "fixed" => FileYMode::Fixed,
                    "row-spaced" => FileYMode::RowSpaced,
                    other => {
                        return Err(CliError::Config(format!(
                            "Invalid y-mode '{}'. Expected 'fixed' or 'row-spaced'.",
                            other
                        )));
                    }
                });
            }
            "return-home" => {
                config.return_home = Some(value_str.trim().parse().map_err(|_| {
                    CliError::Config(format!(
                        "Invalid boolean value for {}: {}",
                        key, value_str
                    ))
                })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
