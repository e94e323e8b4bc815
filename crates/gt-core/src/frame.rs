use crate::error::{CoreError, Result};

/// Grille de pixels décodée.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel. Seuls R, G et B
/// participent à la luminance.
///
/// # Example
/// ```
/// use gt_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use gt_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Buffer opaque d'une seule couleur.
    ///
    /// # Example
    /// ```
    /// use gt_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 2, (10, 20, 30));
    /// assert_eq!(fb.pixel(1, 1), (10, 20, 30, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: (u8, u8, u8)) -> Self {
        let (r, g, b) = rgb;
        let data = [r, g, b, 255].repeat(width as usize * height as usize);
        Self {
            data,
            width,
            height,
        }
    }

    /// Build a frame from explicit rows of RGB pixels.
    ///
    /// # Errors
    /// `EmptyInput` if there are no rows or the first row is empty,
    /// `RaggedInput` if any row length differs from the first one.
    ///
    /// # Example
    /// ```
    /// use gt_core::frame::FrameBuffer;
    /// let rows = vec![vec![(0, 0, 0), (255, 255, 255)], vec![(0, 0, 0)]];
    /// assert!(FrameBuffer::from_rows(&rows).is_err());
    /// ```
    pub fn from_rows(rows: &[Vec<(u8, u8, u8)>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(CoreError::EmptyInput);
        }
        let mut data = Vec::with_capacity(width * rows.len() * 4);
        for row in rows {
            if row.len() != width {
                return Err(CoreError::RaggedInput {
                    expected: width,
                    found: row.len(),
                });
            }
            for &(r, g, b) in row {
                data.extend_from_slice(&[r, g, b, 255]);
            }
        }
        Ok(Self {
            data,
            width: width as u32,
            height: rows.len() as u32,
        })
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use gt_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// let (r, g, b, a) = fb.pixel(0, 0);
    /// assert_eq!((r, g, b, a), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Écrit un pixel opaque en (x, y).
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: (u8, u8, u8)) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&[rgb.0, rgb.1, rgb.2, 255]);
    }
}

/// Grille de luminances, mêmes dimensions que la frame source.
///
/// # Example
/// ```
/// use gt_core::frame::BrightnessGrid;
/// let grid = BrightnessGrid::from_values(2, 1, vec![0.0, 255.0]).unwrap();
/// assert_eq!(grid.get(1, 0), 255.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BrightnessGrid {
    /// Luminances, row-major.
    pub values: Vec<f64>,
    /// Width in samples.
    pub width: u32,
    /// Height in samples.
    pub height: u32,
}

impl BrightnessGrid {
    /// Wrap row-major values.
    ///
    /// # Errors
    /// `RaggedInput` if `values.len() != width * height`.
    pub fn from_values(width: u32, height: u32, values: Vec<f64>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(CoreError::RaggedInput {
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Luminance at (x, y).
    ///
    /// # Panics
    /// Panics if (x, y) lies outside the grid.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        assert!(
            x < self.width && y < self.height,
            "brightness sample ({x}, {y}) outside {}×{} grid",
            self.width,
            self.height
        );
        self.values[y as usize * self.width as usize + x as usize]
    }
}

/// Grille de sortie ASCII, un caractère par cellule.
///
/// # Example
/// ```
/// use gt_core::frame::AsciiGrid;
/// let mut grid = AsciiGrid::new(3, 2);
/// grid.set(0, 0, '@');
/// assert_eq!(grid.get(0, 0), '@');
/// assert_eq!(grid.to_text(), "@  \n   \n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<char>,
    /// Width in characters.
    pub width: u32,
    /// Height in characters.
    pub height: u32,
}

impl AsciiGrid {
    /// Crée une grille remplie d'espaces.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![' '; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set a cell at position (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, ch: char) {
        self.cells[y as usize * self.width as usize + x as usize] = ch;
    }

    /// Get the character at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> char {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Rend la grille en texte : une ligne par rangée, `\n` après chaque rangée.
    #[must_use]
    pub fn to_text(&self) -> String {
        if self.width == 0 {
            return "\n".repeat(self.height as usize);
        }
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width as usize) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}
