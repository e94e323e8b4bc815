use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persisted preset is unreadable as JSON or misses a required key.
    #[error("Format de preset invalide ({}) : {reason}", path.display())]
    Format {
        /// Offending file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Save target is already present. Presets are never overwritten.
    #[error("Le fichier existe déjà : {}", path.display())]
    AlreadyExists {
        /// Path that was not written.
        path: PathBuf,
    },

    /// A sampling cell falls outside the screenshot.
    #[error(
        "Cellule hors image : {width}×{height} à ({x}, {y}) dans une image {grid_width}×{grid_height}"
    )]
    OutOfBounds {
        /// Left edge of the cell.
        x: u32,
        /// Top edge of the cell.
        y: u32,
        /// Cell width.
        width: u32,
        /// Cell height.
        height: u32,
        /// Screenshot width.
        grid_width: u32,
        /// Screenshot height.
        grid_height: u32,
    },

    /// Pixel rows of unequal length, or a buffer that does not match its dimensions.
    #[error("Grille de pixels irrégulière : attendu {expected} valeurs, trouvé {found}")]
    RaggedInput {
        /// Expected element count.
        expected: usize,
        /// Actual element count.
        found: usize,
    },

    /// Pixel grid with no pixels.
    #[error("Grille de pixels vide")]
    EmptyInput,

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Filesystem failure while reading or writing a preset.
    #[error("Erreur d'E/S sur {}", path.display())]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
