use crate::cli::{ExportArgs, ShowArgs};
use crate::error::Result;
use polarstar::core::io::csv::export_wells;
use polarstar::{Plate, load_plate};
use tracing::info;

fn describe(plate: &Plate) -> String {
    let mut out = format!(
        "{}x{} plate, {} of {} wells filled\n",
        plate.rows(),
        plate.cols(),
        plate.filled_wells().count(),
        plate.well_count()
    );
    out.push_str(&plate.to_string());

    let legend = plate.substances();
    if !legend.is_empty() {
        out.push_str("Substances:\n");
        for (substance, color) in legend {
            match color {
                Some(color) => out.push_str(&format!("  {} [{}]\n", substance, color)),
                None => out.push_str(&format!("  {}\n", substance)),
            }
        }
    }
    out
}

pub fn run_show(args: ShowArgs) -> Result<()> {
    let plate = load_plate(&args.name)?;
    info!("Loaded plate from {:?}", &args.name);
    print!("{}", describe(&plate));
    Ok(())
}

pub fn run_export(args: ExportArgs) -> Result<()> {
    let plate = load_plate(&args.name)?;
    export_wells(&plate, &args.output)?;
    info!(
        "Exported {} wells to {:?}",
        plate.well_count(),
        &args.output
    );
    println!("✓ Wrote {} wells to {}", plate.well_count(), args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use polarstar::{StarError, WellValue};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn describe_lists_rows_and_legend() {
        let mut plate = Plate::new(2, 2).unwrap();
        plate
            .fill_custom("A1", WellValue::Blank, Some("Buffer"), Some("grey"))
            .unwrap();
        plate
            .fill_custom("B2", WellValue::Label("ref".into()), Some("Dye"), None)
            .unwrap();

        let text = describe(&plate);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "2x2 plate, 2 of 4 wells filled");
        assert!(lines[1].starts_with("Buffer Blank [grey] | Empty"));
        assert!(lines[2].starts_with("Empty | Dye"));
        assert_eq!(lines[3], "Substances:");
        assert_eq!(lines[4], "  Buffer [grey]");
        assert_eq!(lines[5], "  Dye");
    }

    #[test]
    fn export_writes_csv_next_to_the_plate() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("plate");
        Plate::new(2, 3).unwrap().save(&name).unwrap();
        let output = dir.path().join("wells.csv");

        run_export(ExportArgs {
            name,
            output: output.clone(),
        })
        .unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 7);
    }

    #[test]
    fn show_reports_missing_plate() {
        let dir = tempdir().unwrap();
        let result = run_show(ShowArgs {
            name: dir.path().join("absent"),
        });
        assert!(matches!(
            result,
            Err(CliError::Storage(StarError::NotFound { .. }))
        ));
    }
}
