use std::path::Path;

use anyhow::{Context, Result};
use gt_core::frame::FrameBuffer;
use image::DynamicImage;

/// Décode un fichier image (PNG, JPEG, BMP, GIF) en frame RGBA.
///
/// # Errors
/// Returns an error if the file is missing or cannot be decoded.
///
/// # Example
/// ```no_run
/// use gt_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("image.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let frame = frame_from_image(img);
    log::debug!(
        "Image décodée : {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Convert an already decoded image to a frame.
///
/// # Example
/// ```
/// use gt_source::image::frame_from_image;
/// let img = image::DynamicImage::new_rgb8(4, 3);
/// let frame = frame_from_image(img);
/// assert_eq!((frame.width, frame.height), (4, 3));
/// assert_eq!(frame.pixel(0, 0), (0, 0, 0, 255));
/// ```
#[must_use]
pub fn frame_from_image(img: DynamicImage) -> FrameBuffer {
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.png");
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(1, 0, Rgb([200, 100, 50]));
        img.save(&path).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width, frame.height), (2, 1));
        assert_eq!(frame.pixel(0, 0), (0, 0, 0, 255));
        assert_eq!(frame.pixel(1, 0), (200, 100, 50, 255));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_image(Path::new("does/not/exist.png")).unwrap_err();
        assert!(format!("{err}").contains("exist.png"));
    }
}
