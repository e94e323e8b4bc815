//! Moteur de conversion ASCII de glyphtone.
//!
//! Converts pixel frames to text by matching each sample's brightness to
//! the closest character of a calibrated preset.

pub mod calibrate;
pub mod convert;
pub mod matcher;
pub mod resolution;

pub use calibrate::calibrate_from_file;
pub use convert::{ConvertOptions, convert_file, convert_frame, render_grid};
pub use matcher::nearest_symbol;
pub use resolution::target_resolution;
