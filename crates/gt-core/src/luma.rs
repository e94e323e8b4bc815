use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::frame::{BrightnessGrid, FrameBuffer};

/// Poids BT.601 du rouge.
pub const LUMA_R: f64 = 0.299;
/// Poids BT.601 du vert.
pub const LUMA_G: f64 = 0.587;
/// Poids BT.601 du bleu.
pub const LUMA_B: f64 = 0.114;

/// Échelle numérique des canaux, donc des luminances.
///
/// Un preset n'est utilisable qu'avec l'échelle qui a servi à le générer :
/// le seuil de correspondance est absolu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelScale {
    /// Canaux 0–255.
    #[default]
    Byte,
    /// Canaux 0–1.
    Unit,
}

impl ChannelScale {
    /// Parse a scale name (`byte` or `unit`, case-insensitive).
    ///
    /// # Example
    /// ```
    /// use gt_core::luma::ChannelScale;
    /// assert_eq!(ChannelScale::from_name("Unit"), Some(ChannelScale::Unit));
    /// assert_eq!(ChannelScale::from_name("percent"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "byte" => Some(Self::Byte),
            "unit" => Some(Self::Unit),
            _ => None,
        }
    }

    #[inline(always)]
    fn normalize(self, channel: u8) -> f64 {
        match self {
            Self::Byte => f64::from(channel),
            Self::Unit => f64::from(channel) / 255.0,
        }
    }
}

/// Luma of one RGB triple already on the target scale.
#[inline(always)]
#[must_use]
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Convert a frame to a brightness grid of identical dimensions.
///
/// Alpha is ignored.
///
/// # Errors
/// `EmptyInput` for a frame without pixels, `RaggedInput` when the buffer
/// length does not match `width × height × 4`.
///
/// # Example
/// ```
/// use gt_core::frame::FrameBuffer;
/// use gt_core::luma::{grayscale, ChannelScale};
/// let fb = FrameBuffer::filled(3, 2, (255, 255, 255));
/// let grid = grayscale(&fb, ChannelScale::Byte).unwrap();
/// assert_eq!((grid.width, grid.height), (3, 2));
/// assert!((grid.get(2, 1) - 255.0).abs() < 1e-9);
/// ```
pub fn grayscale(frame: &FrameBuffer, scale: ChannelScale) -> Result<BrightnessGrid> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CoreError::EmptyInput);
    }
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(CoreError::RaggedInput {
            expected,
            found: frame.data.len(),
        });
    }

    let values = frame
        .data
        .chunks_exact(4)
        .map(|px| {
            luma(
                scale.normalize(px[0]),
                scale.normalize(px[1]),
                scale.normalize(px[2]),
            )
        })
        .collect();

    BrightnessGrid::from_values(frame.width, frame.height, values)
}
