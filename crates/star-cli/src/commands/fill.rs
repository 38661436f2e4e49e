use crate::cli::{ClearArgs, DiluteArgs, SetArgs, ValueArgs};
use crate::error::{CliError, Result};
use polarstar::{WellValue, load_plate};
use tracing::info;

fn well_value(args: &ValueArgs) -> Result<WellValue> {
    match (args.concentration, &args.label, args.blank) {
        (Some(amount), None, false) => Ok(WellValue::Concentration(amount)),
        (None, Some(text), false) => Ok(WellValue::Label(text.clone())),
        (None, None, true) => Ok(WellValue::Blank),
        _ => Err(CliError::Argument(
            "Exactly one of --concentration, --label or --blank is required.".to_string(),
        )),
    }
}

pub fn run_dilute(args: DiluteArgs) -> Result<()> {
    let mut plate = load_plate(&args.name)?;
    info!(
        "Filling {} dilutions of '{}' from {} (initial {}, factor {})",
        args.count, args.substance, args.start, args.initial, args.factor
    );

    let filled = plate.fill_serial_dilutions(
        &args.start,
        args.initial,
        args.factor,
        args.count,
        &args.substance,
        args.color.as_deref(),
    )?;
    let saved = plate.save(&args.name)?;

    if let (Some(first), Some(last)) = (filled.first(), filled.last()) {
        println!(
            "✓ Filled {} wells ({}..{}) with {} in {}",
            filled.len(),
            first,
            last,
            args.substance,
            saved.display()
        );
    }
    Ok(())
}

pub fn run_set(args: SetArgs) -> Result<()> {
    let value = well_value(&args.value)?;
    let mut plate = load_plate(&args.name)?;

    let address = plate.fill_custom(
        &args.well,
        value,
        args.substance.as_deref(),
        args.color.as_deref(),
    )?;
    let saved = plate.save(&args.name)?;
    info!("Set well {} in {:?}", address, &saved);
    println!("✓ Well {} set to: {}", address, plate.get_well(&args.well)?);
    Ok(())
}

pub fn run_clear(args: ClearArgs) -> Result<()> {
    let mut plate = load_plate(&args.name)?;
    let address = plate.clear_well(&args.well)?;
    let saved = plate.save(&args.name)?;
    info!("Cleared well {} in {:?}", address, &saved);
    println!("✓ Well {} cleared", address);
    Ok(())
}
