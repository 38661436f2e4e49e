mod builder;
mod file;

pub use builder::build_gcode_params;
