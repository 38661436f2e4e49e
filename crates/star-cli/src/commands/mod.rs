pub mod fill;
pub mod gcode;
pub mod new;
pub mod show;
