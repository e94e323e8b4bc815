use std::path::Path;

use anyhow::{Context, Result};
use gt_core::frame::{AsciiGrid, BrightnessGrid, FrameBuffer};
use gt_core::luma::{ChannelScale, grayscale};
use gt_core::preset::{BrightnessTable, Preset};
use gt_source::image::load_image;
use gt_source::resize::resize_frame;

use crate::matcher::nearest_symbol;
use crate::resolution::target_resolution;

/// Paramètres d'une conversion.
///
/// # Example
/// ```
/// use gt_ascii::convert::ConvertOptions;
/// let options = ConvertOptions { output_width: 80, ..ConvertOptions::default() };
/// assert_eq!(options.output_height, 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Largeur en caractères, 0 = déduite.
    pub output_width: u32,
    /// Hauteur en caractères, 0 = déduite.
    pub output_height: u32,
    /// Échelle des luminances, identique à celle du preset.
    pub scale: ChannelScale,
}

/// Convert a frame into a character grid.
///
/// The frame is resized in memory to the target resolution (one pixel per
/// character), converted to brightness, then every sample is matched
/// against the preset.
///
/// # Errors
/// Returns an error if the preset cell size or the target resolution is
/// degenerate, or if the frame is malformed.
///
/// # Example
/// ```
/// use gt_ascii::convert::{ConvertOptions, render_grid};
/// use gt_core::frame::FrameBuffer;
/// use gt_core::preset::Preset;
///
/// let preset = Preset {
///     cell_width: 1,
///     cell_height: 1,
///     brightness: [('#', 255.0)].into_iter().collect(),
/// };
/// let frame = FrameBuffer::filled(4, 4, (255, 255, 255));
/// let options = ConvertOptions { output_width: 3, output_height: 2, ..ConvertOptions::default() };
/// let grid = render_grid(&frame, &preset, &options).unwrap();
/// assert_eq!((grid.width, grid.height), (3, 2));
/// ```
pub fn render_grid(
    frame: &FrameBuffer,
    preset: &Preset,
    options: &ConvertOptions,
) -> Result<AsciiGrid> {
    let (width, height) = target_resolution(
        (frame.width, frame.height),
        (preset.cell_width, preset.cell_height),
        (options.output_width, options.output_height),
    )?;
    log::debug!(
        "Résolution cible : {width}×{height} (source {}×{}, cellule {}×{})",
        frame.width,
        frame.height,
        preset.cell_width,
        preset.cell_height
    );
    if preset.brightness.is_empty() {
        log::warn!("Preset sans caractères : la sortie sera vide.");
    }
    warn_on_scale_mismatch(&preset.brightness, options.scale);

    let resized = resize_frame(frame, width, height)?;
    let brightness = grayscale(&resized, options.scale)?;

    let mut grid = AsciiGrid::new(width, height);
    fill_grid(&brightness, &preset.brightness, &mut grid);
    Ok(grid)
}

/// Convert a frame into text, one line per row, each ending in `\n`.
///
/// # Errors
/// See [`render_grid`].
pub fn convert_frame(frame: &FrameBuffer, preset: &Preset, options: &ConvertOptions) -> Result<String> {
    Ok(render_grid(frame, preset, options)?.to_text())
}

/// Décode `image` puis le convertit en texte.
///
/// # Errors
/// Returns an error if the image cannot be decoded or converted.
///
/// # Example
/// ```no_run
/// use gt_ascii::convert::{ConvertOptions, convert_file};
/// use gt_core::preset::Preset;
/// use std::path::Path;
///
/// let preset = Preset::load(Path::new("presets/Notepad++WhiteOnBlack.json")).unwrap();
/// let art = convert_file(Path::new("image.png"), &preset, &ConvertOptions::default()).unwrap();
/// ```
pub fn convert_file(image: &Path, preset: &Preset, options: &ConvertOptions) -> Result<String> {
    let frame = load_image(image)?;
    convert_frame(&frame, preset, options)
        .with_context(|| format!("Conversion impossible : {}", image.display()))
}

/// Un preset 0–1 lu en 0–255 (ou l'inverse) ne produit presque que des blancs.
fn warn_on_scale_mismatch(table: &BrightnessTable, scale: ChannelScale) {
    let Some(max) = table.iter().map(|(_, v)| v).reduce(f64::max) else {
        return;
    };
    match scale {
        ChannelScale::Byte if max <= 1.0 => log::warn!(
            "Preset en 0–1 (max {max}) converti en échelle byte : utilisez --scale unit."
        ),
        ChannelScale::Unit if max > 1.0 => log::warn!(
            "Preset en 0–255 (max {max}) converti en échelle unit : utilisez --scale byte."
        ),
        _ => {}
    }
}

/// One brightness sample per cell; `brightness` and `grid` share dimensions.
fn fill_grid(brightness: &BrightnessGrid, table: &BrightnessTable, grid: &mut AsciiGrid) {
    debug_assert_eq!((brightness.width, brightness.height), (grid.width, grid.height));
    for cy in 0..grid.height {
        for cx in 0..grid.width {
            grid.set(cx, cy, nearest_symbol(brightness.get(cx, cy), table));
        }
    }
}
