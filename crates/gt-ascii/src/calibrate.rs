use std::path::Path;

use anyhow::{Context, Result};
use gt_core::luma::{ChannelScale, grayscale};
use gt_core::preset::Preset;
use gt_source::image::load_image;

/// Génère un preset à partir d'une capture d'écran de `reference_text`.
///
/// `origin` est le coin haut-gauche du premier caractère dans la capture.
/// `scale` doit être celle utilisée ensuite pour convertir.
///
/// # Errors
/// Returns an error if the screenshot cannot be decoded, or if the cell
/// layout does not fit inside it (`CoreError::OutOfBounds`).
///
/// # Example
/// ```no_run
/// use gt_ascii::calibrate::calibrate_from_file;
/// use gt_core::luma::ChannelScale;
/// use std::path::Path;
///
/// let preset = calibrate_from_file(
///     Path::new("screens/notepad.png"),
///     " .:-=+*#%@",
///     8,
///     16,
///     (0, 0),
///     ChannelScale::Byte,
/// )
/// .unwrap();
/// ```
pub fn calibrate_from_file(
    screenshot: &Path,
    reference_text: &str,
    cell_width: u32,
    cell_height: u32,
    origin: (u32, u32),
    scale: ChannelScale,
) -> Result<Preset> {
    let frame = load_image(screenshot)?;
    let brightness = grayscale(&frame, scale)?;
    let preset = Preset::generate(&brightness, reference_text, cell_width, cell_height, origin)
        .with_context(|| format!("Calibration impossible sur {}", screenshot.display()))?;
    log::info!(
        "Preset généré depuis {} : {} caractères",
        screenshot.display(),
        preset.brightness.len()
    );
    Ok(preset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ConvertOptions, convert_file};
    use gt_core::error::CoreError;
    use image::{Rgb, RgbImage};

    /// Writes a 4×2 PNG: black cell on the left, white cell on the right.
    fn write_two_tone(path: &Path) {
        let img = RgbImage::from_fn(4, 2, |x, _| {
            if x < 2 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        });
        img.save(path).unwrap();
    }

    #[test]
    fn screenshot_to_preset_file_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let screen = dir.path().join("screen.png");
        let preset_path = dir.path().join("preset.json");
        let target = dir.path().join("target.png");
        write_two_tone(&screen);
        RgbImage::from_pixel(6, 6, Rgb([255, 255, 255]))
            .save(&target)
            .unwrap();

        let preset = calibrate_from_file(&screen, ".#", 2, 2, (0, 0), ChannelScale::Byte).unwrap();
        preset.save(&preset_path).unwrap();
        let preset = Preset::load(&preset_path).unwrap();

        let options = ConvertOptions {
            output_width: 2,
            output_height: 1,
            scale: ChannelScale::Byte,
        };
        assert_eq!(convert_file(&target, &preset, &options).unwrap(), "##\n");
    }

    #[test]
    fn unit_scale_preset() {
        let dir = tempfile::tempdir().unwrap();
        let screen = dir.path().join("screen.png");
        write_two_tone(&screen);

        let preset = calibrate_from_file(&screen, ".#", 2, 2, (0, 0), ChannelScale::Unit).unwrap();
        let white = preset.brightness.get('#').unwrap();
        assert!((white - 1.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_layout_is_out_of_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let screen = dir.path().join("screen.png");
        write_two_tone(&screen);

        let err = calibrate_from_file(&screen, ".#\n.#", 2, 2, (0, 0), ChannelScale::Byte)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::OutOfBounds { x: 0, y: 2, .. })
        ));
    }
}
