use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use gt_core::error::CoreError;
use gt_core::frame::FrameBuffer;

/// Redimensionne une frame en mémoire, convolution Lanczos3 (antialiasing).
///
/// # Errors
/// `CoreError::InvalidDimensions` if the source or the target has a zero
/// dimension, `CoreError::RaggedInput` if the source buffer does not hold
/// `width × height` RGBA pixels.
///
/// # Example
/// ```
/// use gt_source::resize::resize_frame;
/// use gt_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(100, 100);
/// let dst = resize_frame(&src, 50, 20).unwrap();
/// assert_eq!((dst.width, dst.height), (50, 20));
/// ```
pub fn resize_frame(src: &FrameBuffer, width: u32, height: u32) -> Result<FrameBuffer> {
    for (w, h) in [(src.width, src.height), (width, height)] {
        if w == 0 || h == 0 {
            return Err(CoreError::InvalidDimensions {
                width: w,
                height: h,
            }
            .into());
        }
    }
    let expected = src.width as usize * src.height as usize * 4;
    if src.data.len() != expected {
        return Err(CoreError::RaggedInput {
            expected,
            found: src.data.len(),
        }
        .into());
    }

    if (src.width, src.height) == (width, height) {
        return Ok(src.clone());
    }

    let src_image = Image::from_vec_u8(src.width, src.height, src.data.clone(), PixelType::U8x4)
        .context("Invalid source dimensions")?;
    let mut dst_image = Image::new(width, height, PixelType::U8x4);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .context("Resize failed")?;

    Ok(FrameBuffer {
        data: dst_image.into_vec(),
        width,
        height,
    })
}
