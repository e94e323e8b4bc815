//! Types partagés de glyphtone : grilles, luminance, échantillonnage, presets.
//!
//! This crate holds everything the converter needs that does not touch
//! image files: pixel and brightness grids, the luma conversion, block
//! sampling, the preset model and its JSON form, and the TOML config.

pub mod config;
pub mod error;
pub mod frame;
pub mod luma;
pub mod preset;
pub mod sampler;

pub use config::AppConfig;
pub use error::CoreError;
pub use frame::{AsciiGrid, BrightnessGrid, FrameBuffer};
pub use luma::ChannelScale;
pub use preset::{BrightnessTable, Preset};
