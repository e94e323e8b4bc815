use crate::frame::BrightnessGrid;

/// Moyenne arithmétique des luminances d'un bloc `width × height` dont le coin
/// haut-gauche est en (x, y).
///
/// L'appelant garantit que le bloc est entièrement dans la grille.
///
/// # Panics
/// Panics if the block extends past the grid or has a zero dimension.
///
/// # Example
/// ```
/// use gt_core::frame::BrightnessGrid;
/// use gt_core::sampler::average_brightness;
/// let grid = BrightnessGrid::from_values(2, 2, vec![0.0, 10.0, 20.0, 30.0]).unwrap();
/// assert_eq!(average_brightness(&grid, 0, 0, 2, 2), 15.0);
/// assert_eq!(average_brightness(&grid, 1, 0, 1, 2), 20.0);
/// ```
#[must_use]
pub fn average_brightness(grid: &BrightnessGrid, x: u32, y: u32, width: u32, height: u32) -> f64 {
    assert!(width > 0 && height > 0, "empty sampling block {width}×{height}");
    assert!(
        block_fits(grid, x, y, width, height),
        "sampling block {width}×{height} at ({x}, {y}) outside {}×{} grid",
        grid.width,
        grid.height
    );

    let stride = grid.width as usize;
    let mut sum = 0.0;
    for row in y..y + height {
        let start = row as usize * stride + x as usize;
        sum += grid.values[start..start + width as usize].iter().sum::<f64>();
    }
    sum / (f64::from(width) * f64::from(height))
}

/// Whether a `width × height` block at (x, y) lies fully inside the grid.
#[inline]
#[must_use]
pub fn block_fits(grid: &BrightnessGrid, x: u32, y: u32, width: u32, height: u32) -> bool {
    u64::from(x) + u64::from(width) <= u64::from(grid.width)
        && u64::from(y) + u64::from(height) <= u64::from(grid.height)
}
