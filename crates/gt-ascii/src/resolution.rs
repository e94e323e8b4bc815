use gt_core::error::{CoreError, Result};

/// Résolution de la grille de caractères pour une image `original` et un
/// preset de cellule `cell` (largeur, hauteur).
///
/// Avec `ratio = cell_height / cell_width` :
/// - `(0, 0)` : largeur `round(w × ratio)`, hauteur d'origine. Seule la
///   largeur est corrigée, la hauteur reste en pixels (comportement
///   historique, conservé tel quel).
/// - `(0, h)` : largeur déduite de `h` en conservant les proportions.
/// - `(w, 0)` : hauteur déduite de `w` en conservant les proportions.
/// - `(w, h)` : imposée, sans correction.
///
/// # Errors
/// `InvalidDimensions` for an empty image, a zero cell size, or a
/// resulting grid with a zero dimension.
///
/// # Example
/// ```
/// use gt_ascii::resolution::target_resolution;
/// assert_eq!(target_resolution((100, 50), (8, 16), (0, 0)).unwrap(), (200, 50));
/// assert_eq!(target_resolution((100, 50), (8, 16), (40, 0)).unwrap(), (40, 10));
/// ```
pub fn target_resolution(
    original: (u32, u32),
    cell: (u32, u32),
    requested: (u32, u32),
) -> Result<(u32, u32)> {
    let (original_width, original_height) = original;
    let (cell_width, cell_height) = cell;
    if cell_width == 0 || cell_height == 0 {
        return Err(CoreError::InvalidDimensions {
            width: cell_width,
            height: cell_height,
        });
    }
    if original_width == 0 || original_height == 0 {
        return Err(CoreError::InvalidDimensions {
            width: original_width,
            height: original_height,
        });
    }

    let ratio = f64::from(cell_height) / f64::from(cell_width);
    let ow = f64::from(original_width);
    let oh = f64::from(original_height);

    let target = match requested {
        (0, 0) => (to_cells(ow * ratio), original_height),
        (0, height) => {
            let k = (oh / f64::from(height)) / ratio;
            (to_cells(ow / k), height)
        }
        (width, 0) => {
            let k = (ow / f64::from(width)) * ratio;
            (width, to_cells(oh / k))
        }
        exact => exact,
    };

    if target.0 == 0 || target.1 == 0 {
        return Err(CoreError::InvalidDimensions {
            width: target.0,
            height: target.1,
        });
    }
    Ok(target)
}

#[inline]
fn to_cells(value: f64) -> u32 {
    value.round() as u32
}
