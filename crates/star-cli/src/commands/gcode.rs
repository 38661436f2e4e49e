use crate::cli::GcodeArgs;
use crate::config::build_gcode_params;
use crate::error::Result;
use polarstar::{generate_gcode, load_plate};
use tracing::{debug, info};

pub fn run(args: GcodeArgs) -> Result<()> {
    info!("Building motion configuration...");
    let params = build_gcode_params(&args)?;
    debug!("Resolved motion parameters: {:?}", &params);

    let plate = load_plate(&args.name)?;
    info!(
        "Generating G-code for {}x{} plate ({} wells)",
        plate.rows(),
        plate.cols(),
        plate.well_count()
    );

    let program = generate_gcode(&plate, &params, &args.output)?;
    info!(
        "Wrote {} lines to {:?}, travel distance {:.2} mm",
        program.lines().len(),
        &args.output,
        program.travel_distance()
    );
    println!(
        "✓ G-code for {} wells written to {}",
        program.stops().len(),
        args.output.display()
    );
    Ok(())
}
