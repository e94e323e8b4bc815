use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::luma::ChannelScale;

/// Configuration d'exécution de glyphtone.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use gt_core::config::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!(config.output_width, 0);
/// assert_eq!(config.output.to_str(), Some("result.txt"));
/// assert_eq!(config.scale, gt_core::luma::ChannelScale::Unit);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    // === Fichiers ===
    /// Preset JSON à charger.
    pub preset: PathBuf,
    /// Image à convertir.
    pub image: PathBuf,
    /// Fichier texte de sortie.
    pub output: PathBuf,

    // === Conversion ===
    /// Largeur cible en caractères. 0 = déduite.
    pub output_width: u32,
    /// Hauteur cible en caractères. 0 = déduite.
    pub output_height: u32,
    /// Échelle des luminances (doit correspondre au preset).
    pub scale: ChannelScale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preset: PathBuf::from("presets/Notepad++WhiteOnBlack.json"),
            image: PathBuf::from("image.png"),
            output: PathBuf::from("result.txt"),
            output_width: 0,
            output_height: 0,
            // Les presets Notepad++ existants sont calibrés en 0–1.
            scale: ChannelScale::Unit,
        }
    }
}

/// Structure TOML brute, toutes les sections optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    paths: Option<PathsSection>,
    convert: Option<ConvertSection>,
}

#[derive(Deserialize)]
struct PathsSection {
    preset: Option<PathBuf>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Deserialize)]
struct ConvertSection {
    output_width: Option<u32>,
    output_height: Option<u32>,
    scale: Option<String>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this layout.
///
/// # Example
/// ```
/// use gt_core::config::parse_config;
/// let config = parse_config("[convert]\noutput_width = 80\n").unwrap();
/// assert_eq!(config.output_width, 80);
/// assert_eq!(config.output_height, 0);
/// ```
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = AppConfig::default();

    if let Some(p) = file.paths {
        if let Some(v) = p.preset {
            config.preset = v;
        }
        if let Some(v) = p.image {
            config.image = v;
        }
        if let Some(v) = p.output {
            config.output = v;
        }
    }

    if let Some(c) = file.convert {
        if let Some(v) = c.output_width {
            config.output_width = v;
        }
        if let Some(v) = c.output_height {
            config.output_height = v;
        }
        if let Some(name) = c.scale {
            match ChannelScale::from_name(&name) {
                Some(scale) => config.scale = scale,
                None => log::warn!("Échelle inconnue '{name}', utilisation du défaut."),
            }
        }
    }

    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gt_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse_config(
            r#"
[paths]
preset = "presets/custom.json"
output = "out/art.txt"

[convert]
output_height = 40
scale = "byte"
"#,
        )
        .unwrap();
        assert_eq!(config.preset, PathBuf::from("presets/custom.json"));
        assert_eq!(config.image, PathBuf::from("image.png"));
        assert_eq!(config.output, PathBuf::from("out/art.txt"));
        assert_eq!(config.output_height, 40);
        assert_eq!(config.scale, ChannelScale::Byte);
    }

    #[test]
    fn unknown_scale_keeps_default() {
        let config = parse_config("[convert]\nscale = \"percent\"\n").unwrap();
        assert_eq!(config.scale, ChannelScale::Unit);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config("[convert\noutput_width = ").is_err());
    }
}
