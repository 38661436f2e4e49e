use crate::cli::NewArgs;
use crate::error::{CliError, Result};
use polarstar::Plate;
use polarstar::core::io::star::star_path;
use polarstar::core::models::format;
use tracing::{debug, info};

pub fn run(args: NewArgs) -> Result<()> {
    let plate = match (&args.format, args.rows, args.cols) {
        (Some(name), _, _) => Plate::standard(name)?,
        (None, Some(rows), Some(cols)) => Plate::new(rows, cols)?,
        _ => {
            return Err(CliError::Argument(format!(
                "Specify either --format (one of {}) or both --rows and --cols.",
                format::names().join(", ")
            )));
        }
    };
    debug!("Created {}x{} plate in memory.", plate.rows(), plate.cols());

    let path = star_path(&args.name);
    if path.exists() && !args.force {
        return Err(CliError::Argument(format!(
            "Plate file '{}' already exists. Pass --force to overwrite it.",
            path.display()
        )));
    }

    let saved = plate.save(&args.name)?;
    info!("Saved empty plate to {:?}", &saved);
    println!(
        "✓ Created {}x{} plate ({} wells) at {}",
        plate.rows(),
        plate.cols(),
        plate.well_count(),
        saved.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(name: std::path::PathBuf) -> NewArgs {
        NewArgs {
            name,
            format: None,
            rows: None,
            cols: None,
            force: false,
        }
    }

    #[test]
    fn creates_standard_and_custom_plates() {
        let dir = tempdir().unwrap();

        let mut standard = args(dir.path().join("standard"));
        standard.format = Some("96".to_string());
        run(standard).unwrap();
        let plate = polarstar::load_plate(dir.path().join("standard")).unwrap();
        assert_eq!((plate.rows(), plate.cols()), (8, 12));

        let mut custom = args(dir.path().join("custom"));
        custom.rows = Some(3);
        custom.cols = Some(5);
        run(custom).unwrap();
        let plate = polarstar::load_plate(dir.path().join("custom")).unwrap();
        assert_eq!((plate.rows(), plate.cols()), (3, 5));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempdir().unwrap();
        let mut first = args(dir.path().join("plate"));
        first.format = Some("24".to_string());
        run(first).unwrap();

        let mut second = args(dir.path().join("plate"));
        second.format = Some("96".to_string());
        assert!(matches!(run(second), Err(CliError::Argument(_))));

        let mut forced = args(dir.path().join("plate"));
        forced.format = Some("96".to_string());
        forced.force = true;
        run(forced).unwrap();
        let plate = polarstar::load_plate(dir.path().join("plate")).unwrap();
        assert_eq!(plate.well_count(), 96);
    }

    #[test]
    fn missing_dimensions_are_an_argument_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            run(args(dir.path().join("plate"))),
            Err(CliError::Argument(_))
        ));
    }
}
