//! Collaborateurs image de glyphtone : décodage de fichiers et redimensionnement.

pub mod image;
pub mod resize;
