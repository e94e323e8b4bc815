use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use gt_ascii::calibrate::calibrate_from_file;
use gt_ascii::convert::{ConvertOptions, convert_file};
use gt_core::config::AppConfig;
use gt_core::luma::ChannelScale;
use gt_core::preset::Preset;

pub mod cli;

use cli::Command;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config
    let mut config = resolve_config(&cli.config)?;
    if let Some(ref name) = cli.scale {
        match ChannelScale::from_name(name) {
            Some(scale) => config.scale = scale,
            None => log::warn!("Échelle inconnue '{name}', utilisation de {:?}.", config.scale),
        }
    }

    // 4. Dispatcher
    match cli.command {
        None => run_convert(&config),
        Some(Command::Convert {
            preset,
            image,
            output,
            width,
            height,
        }) => {
            if let Some(v) = preset {
                config.preset = v;
            }
            if let Some(v) = image {
                config.image = v;
            }
            if let Some(v) = output {
                config.output = v;
            }
            if let Some(v) = width {
                config.output_width = v;
            }
            if let Some(v) = height {
                config.output_height = v;
            }
            run_convert(&config)
        }
        Some(Command::Preset {
            screenshot,
            text,
            cell_width,
            cell_height,
            origin_x,
            origin_y,
            output,
        }) => run_preset(
            &screenshot,
            &text,
            (cell_width, cell_height),
            (origin_x, origin_y),
            &output,
            config.scale,
        ),
    }
}

/// Charge le preset, convertit l'image, écrit le texte.
fn run_convert(config: &AppConfig) -> Result<()> {
    let preset = Preset::load(&config.preset)?;
    log::info!(
        "Preset chargé : {} ({} caractères, cellule {}×{})",
        config.preset.display(),
        preset.brightness.len(),
        preset.cell_width,
        preset.cell_height
    );

    let options = ConvertOptions {
        output_width: config.output_width,
        output_height: config.output_height,
        scale: config.scale,
    };
    let art = convert_file(&config.image, &preset, &options)?;
    log::info!("Image convertie : {}", config.image.display());

    std::fs::write(&config.output, art)
        .with_context(|| format!("Impossible d'écrire {}", config.output.display()))?;
    log::info!("Résultat écrit : {}", config.output.display());
    Ok(())
}

/// Calibre un preset depuis une capture et le sauvegarde sans écraser.
fn run_preset(
    screenshot: &Path,
    text_path: &Path,
    (cell_width, cell_height): (u32, u32),
    origin: (u32, u32),
    output: &Path,
    scale: ChannelScale,
) -> Result<()> {
    let text = std::fs::read_to_string(text_path)
        .with_context(|| format!("Impossible de lire {}", text_path.display()))?;

    let preset = calibrate_from_file(screenshot, &text, cell_width, cell_height, origin, scale)?;
    preset.save(output)?;
    Ok(())
}

/// Config file if present, defaults otherwise.
fn resolve_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        gt_core::config::load_config(path)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        Ok(AppConfig::default())
    }
}
