use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// glyphtone — convertit une image en ASCII art calibré sur une police réelle.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Échelle des luminances : byte (0–255) ou unit (0–1).
    #[arg(long, global = true)]
    pub scale: Option<String>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Sans commande : `convert` avec les chemins de la config.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convertit une image en texte avec un preset existant.
    Convert {
        /// Preset JSON.
        #[arg(long)]
        preset: Option<PathBuf>,
        /// Image source (PNG, JPEG, BMP, GIF).
        #[arg(long)]
        image: Option<PathBuf>,
        /// Fichier texte de sortie (écrasé).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Largeur en caractères (0 = déduite).
        #[arg(long)]
        width: Option<u32>,
        /// Hauteur en caractères (0 = déduite).
        #[arg(long)]
        height: Option<u32>,
    },

    /// Génère un preset depuis une capture d'écran d'un texte connu.
    Preset {
        /// Capture d'écran du texte de référence.
        screenshot: PathBuf,
        /// Fichier contenant exactement le texte affiché dans la capture.
        #[arg(long)]
        text: PathBuf,
        /// Largeur d'une cellule caractère en pixels.
        #[arg(long)]
        cell_width: u32,
        /// Hauteur d'une cellule caractère en pixels.
        #[arg(long)]
        cell_height: u32,
        /// Abscisse du premier caractère.
        #[arg(long, default_value_t = 0)]
        origin_x: u32,
        /// Ordonnée du premier caractère.
        #[arg(long, default_value_t = 0)]
        origin_y: u32,
        /// Preset JSON à créer. Refuse d'écraser un fichier existant.
        #[arg(short, long)]
        output: PathBuf,
    },
}
